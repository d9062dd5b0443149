//! Write a sample annotated CSV for trying out `reprochart`.
//!
//! Usage: `generate_sample [PATH]` (default `sample.csv`).

use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::{Context, Result};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Accuracy-like curve: starts near `start`, saturates towards `ceiling`.
fn learning_curve(step: usize, start: f64, ceiling: f64, rate: f64) -> f64 {
    ceiling - (ceiling - start) * (-rate * step as f64).exp()
}

fn main() -> Result<()> {
    let path = std::env::args().nth(1).unwrap_or_else(|| "sample.csv".to_string());
    let mut rng = SimpleRng::new(42);

    // (name, start, ceiling, rate); the dagger marks a footnoted method
    let methods = [
        ("Baseline", 20.0, 60.0, 0.25),
        ("Tuned", 25.0, 75.0, 0.30),
        ("Ensemble", 30.0, 85.0, 0.20),
        ("Ours\u{2020}", 35.0, 92.0, 0.35),
    ];
    let epochs = 10;

    let file = File::create(&path).with_context(|| format!("creating {path}"))?;
    let mut out = BufWriter::new(file);

    writeln!(out, "title: \"Validation accuracy\"")?;
    writeln!(out, "xtitle: \"Epoch\"")?;
    writeln!(out, "ytitle: \"Accuracy (%)\"")?;
    writeln!(out, "figwidth: 6")?;
    writeln!(out, "figheight: 4")?;
    writeln!(out, "legendsize: 9")?;
    writeln!(out, "ylimmin: 10")?;
    writeln!(out, "ylimmax: 100")?;
    writeln!(out, "ynumticks: 10")?;
    writeln!(out, "=====")?;

    let header: Vec<&str> = std::iter::once("epoch")
        .chain(methods.iter().map(|(name, ..)| *name))
        .collect();
    writeln!(out, "{}", header.join(","))?;

    for epoch in 0..epochs {
        let mut row = vec![format!("e{}", epoch + 1)];
        for (i, &(_, start, ceiling, rate)) in methods.iter().enumerate() {
            // leave a few holes so the sparse-series handling shows up
            if (epoch + i) % 7 == 6 {
                row.push(String::new());
                continue;
            }
            let value = learning_curve(epoch, start, ceiling, rate) + rng.gauss(0.0, 1.5);
            row.push(format!("{value:.1}"));
        }
        writeln!(out, "{}", row.join(","))?;
    }
    out.flush()?;

    println!("Wrote {epochs} rows × {} series to {path}", methods.len());
    Ok(())
}
