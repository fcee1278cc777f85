use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pdbview::options::GeometryOptions;
use pdbview::render::scene::SceneGeometry;
use pdbview::source::StructureText;
use pdbview::style::{ColorMode, HexColor, Style, StyleConfig};

/// Poly-alanine helix with `residues` residues in one chain.
fn helix(residues: usize) -> StructureText {
    let mut text = String::new();
    let mut serial = 1;
    for res in 0..residues {
        let angle = res as f32 * 100f32.to_radians();
        let rise = res as f32 * 1.5;
        for (name, element, radius, dz) in [
            ("N", "N", 1.55, -0.5),
            ("CA", "C", 2.3, 0.0),
            ("C", "C", 1.65, 0.6),
            ("O", "O", 1.9, 1.7),
            ("CB", "C", 3.3, -0.4),
        ] {
            let (x, y) = (radius * angle.cos(), radius * angle.sin());
            text.push_str(&format!(
                "ATOM  {serial:>5}  {name:<3} ALA A{:>4}    {x:>8.3}{y:>8.3}{:>8.3}  1.00  0.00          {element:>2}\n",
                res + 1,
                rise + dz,
            ));
            serial += 1;
        }
    }
    text.push_str("END\n");
    StructureText::new(text)
}

fn style_benchmark(c: &mut Criterion) {
    let text = helix(300);
    let geometry = GeometryOptions::default();
    let mut group = c.benchmark_group("scene_from_text");

    for style in Style::ALL {
        let config =
            StyleConfig::new(style, ColorMode::Spectrum, HexColor::RED);
        group.bench_function(style.keyword(), |b| {
            b.iter(|| {
                black_box(SceneGeometry::from_text(
                    black_box(&text),
                    &config,
                    &geometry,
                ))
            })
        });
    }
    group.finish();
}

fn size_benchmark(c: &mut Criterion) {
    let geometry = GeometryOptions::default();
    let config = StyleConfig::default();
    let mut group = c.benchmark_group("cartoon_by_size");

    for residues in [50, 200, 1000] {
        let text = helix(residues);
        group.bench_function(format!("{residues}_residues"), |b| {
            b.iter(|| {
                black_box(SceneGeometry::from_text(&text, &config, &geometry))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, style_benchmark, size_benchmark);
criterion_main!(benches);
