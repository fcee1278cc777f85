//! Blocking download of PDB files from the RCSB archive.

use super::{Fetcher, PdbId, SourceError, StructureText};
use crate::options::NetworkOptions;

/// Download URL template; `{ID}` is replaced by the identifier.
pub const DEFAULT_URL_TEMPLATE: &str =
    "https://files.rcsb.org/download/{ID}.pdb";

/// Build the download URL for `id` from a template containing `{ID}`.
#[must_use]
pub fn structure_url(template: &str, id: &PdbId) -> String {
    template.replace("{ID}", id.as_str())
}

/// [`Fetcher`] backed by a `ureq` agent.
pub struct RcsbClient {
    agent: ureq::Agent,
    url_template: String,
    max_body_bytes: u64,
}

impl RcsbClient {
    /// Client configured from the network options (URL template, request
    /// timeout and body limit).
    #[must_use]
    pub fn new(options: &NetworkOptions) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(options.timeout()))
            // Non-200 statuses are inspected below rather than raised.
            .http_status_as_error(false)
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
            url_template: options.url_template.clone(),
            max_body_bytes: options.max_body_bytes,
        }
    }

    fn download(&self, url: &str) -> Result<String, String> {
        let mut response =
            self.agent.get(url).call().map_err(|e| e.to_string())?;
        let status = response.status();
        if status.as_u16() != 200 {
            return Err(format!("HTTP status {status}"));
        }
        response
            .body_mut()
            .with_config()
            .limit(self.max_body_bytes)
            .read_to_string()
            .map_err(|e| format!("failed to read response: {e}"))
    }
}

impl Default for RcsbClient {
    fn default() -> Self {
        Self::new(&NetworkOptions::default())
    }
}

impl Fetcher for RcsbClient {
    fn fetch(&self, id: &PdbId) -> Result<StructureText, SourceError> {
        let url = structure_url(&self.url_template, id);
        log::info!("Downloading {id} from {url}");

        match self.download(&url) {
            Ok(body) => {
                log::info!("Downloaded {id} ({} bytes)", body.len());
                Ok(StructureText::new(body))
            }
            Err(reason) => {
                log::warn!("Fetching {id} failed: {reason}");
                Err(SourceError::Unavailable { id: id.to_string() })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    use super::*;

    /// Answer one request on a local port with `response`.
    fn serve_once(response: &'static [u8]) -> (u16, JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let server = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = [0_u8; 4096];
            let _ = stream.read(&mut request).unwrap();
            stream.write_all(response).unwrap();
        });
        (port, server)
    }

    fn local_client(port: u16) -> RcsbClient {
        RcsbClient::new(&NetworkOptions {
            url_template: format!("http://127.0.0.1:{port}/{{ID}}.pdb"),
            timeout_secs: 5.0,
            ..NetworkOptions::default()
        })
    }

    fn id(s: &str) -> PdbId {
        PdbId::parse(s).unwrap().unwrap()
    }

    #[test]
    fn url_uses_identifier_verbatim() {
        assert_eq!(
            structure_url(DEFAULT_URL_TEMPLATE, &id("1AKE")),
            "https://files.rcsb.org/download/1AKE.pdb"
        );
        assert_eq!(
            structure_url(DEFAULT_URL_TEMPLATE, &id("4hhb")),
            "https://files.rcsb.org/download/4hhb.pdb"
        );
    }

    #[test]
    fn url_template_is_configurable() {
        assert_eq!(
            structure_url("http://localhost:8000/{ID}.pdb", &id("1CRN")),
            "http://localhost:8000/1CRN.pdb"
        );
    }

    #[test]
    fn unreachable_host_is_unavailable() {
        let options = NetworkOptions {
            url_template: "http://127.0.0.1:9/{ID}.pdb".into(),
            timeout_secs: 2.0,
            ..NetworkOptions::default()
        };
        let client = RcsbClient::new(&options);
        let err = client.fetch(&id("1AKE")).unwrap_err();
        assert!(matches!(err, SourceError::Unavailable { ref id } if id == "1AKE"));
    }

    #[test]
    fn non_200_status_is_unavailable() {
        let (port, server) = serve_once(
            b"HTTP/1.1 404 Not Found\r\nContent-Length: 9\r\n\
              Connection: close\r\n\r\nnot found",
        );
        let err = local_client(port).fetch(&id("ZZZZ")).unwrap_err();
        assert!(matches!(err, SourceError::Unavailable { ref id } if id == "ZZZZ"));
        server.join().unwrap();
    }

    #[test]
    fn ok_status_returns_the_body() {
        let (port, server) = serve_once(
            b"HTTP/1.1 200 OK\r\nContent-Length: 12\r\n\
              Connection: close\r\n\r\nATOM      1\n",
        );
        let text = local_client(port).fetch(&id("1AKE")).unwrap();
        assert_eq!(text.as_str(), "ATOM      1\n");
        server.join().unwrap();
    }

    #[test]
    #[ignore = "requires network access to files.rcsb.org"]
    fn fetches_existing_and_rejects_missing_structures() {
        let client = RcsbClient::default();
        let text = client.fetch(&id("1AKE")).unwrap();
        assert!(text.as_str().contains("ATOM"));
        assert!(client.fetch(&id("ZZZZ")).is_err());
    }
}
