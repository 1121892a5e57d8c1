use glyph_scatter::prelude::*;
use glyph_scatter_examples::{render_points_to_svg, SvgStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    // One point per letter of the alphabet, spread over a wide container.
    let text = "abcdefghijklmnopqrstuvwxyz";
    let config = DistributionConfig::new(320.0, 180.0)
        .with_max_iterations(20)
        .with_acceptable_error(1e-6);

    let mut rng = StdRng::seed_from_u64(2025);
    let result = compute_distribution(text.chars().count(), &config, &mut rng)?;

    println!(
        "relaxed {} points in {} rounds (converged: {})",
        result.points.len(),
        result.iterations,
        result.converged
    );
    for (ch, p) in text.chars().zip(&result.points) {
        println!("  '{ch}' -> ({:7.2}, {:7.2})", p.x, p.y);
    }

    let out = "distribute-basic.svg";
    render_points_to_svg(
        &result.points,
        config.effective_rect(),
        &SvgStyle::default(),
        out,
    )?;
    println!("wrote {out}");

    Ok(())
}
