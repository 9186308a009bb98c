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
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
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

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let mut rng = SimpleRng::new(42);

    let regions = ["North", "South", "East", "West"];
    let products = [
        "Laptop", "Monitor", "Keyboard", "Mouse", "Headset", "Webcam", "Dock", "Tablet", "Router",
        "Printer",
    ];
    let base_price = [1200.0, 300.0, 80.0, 40.0, 120.0, 90.0, 200.0, 600.0, 150.0, 250.0];

    let output_path = "sample_data.csv";
    let mut writer = csv::Writer::from_path(output_path).context("creating sample CSV")?;
    writer.write_record(["orderId", "region", "product", "units", "unitPrice", "rating"])?;

    let rows = 500;
    for id in 1..=rows {
        let idx = (rng.next_u64() % products.len() as u64) as usize;
        let units = (rng.gauss(5.0, 2.0).round().max(1.0)) as u32;
        let price = (base_price[idx] * rng.gauss(1.0, 0.08) * 100.0).round() / 100.0;

        // ~5% of regions and ratings left blank.
        let region = if rng.next_f64() < 0.05 { "" } else { rng.pick(&regions) };
        let rating = if rng.next_f64() < 0.05 {
            String::new()
        } else {
            format!("{:.1}", rng.gauss(4.0, 0.6).clamp(1.0, 5.0))
        };

        writer.write_record([
            id.to_string(),
            region.to_string(),
            products[idx].to_string(),
            units.to_string(),
            price.to_string(),
            rating,
        ])?;
    }
    writer.flush().context("flushing sample CSV")?;

    log::info!("generated {rows} sample orders");
    println!("Wrote {rows} rows to {output_path}");
    Ok(())
}
