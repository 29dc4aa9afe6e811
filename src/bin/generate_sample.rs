use anyhow::{Context, Result};

use catalog_lens::data::model::ALLOWED_SCHEMAS;

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

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// True roughly once per `n` calls.
    fn one_in(&mut self, n: u64) -> bool {
        self.next_u64() % n == 0
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let mut rng = SimpleRng::new(42);

    let servers = ["WSSPRD01", "WSSPRD02", "wssdev01"];
    let databases = ["SalesDW", "RiskDW", "FinanceDW", "OpsDW"];
    let marts = ["Finance", "Sales", "Risk", "Operations", "HR"];
    let report_kinds = ["Daily", "Weekly", "Monthly", "Quarterly", "Adhoc"];

    // Canonical schemas plus the malformed labels real extracts carry;
    // the viewer's allow-list guard should hide the latter.
    let mut schemas: Vec<&str> = ALLOWED_SCHEMAS.to_vec();
    schemas.extend(["DBO", "dbo_old", "tmp"]);

    let output_path = "sample_catalog.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record(["SERVER", "DB", "SCHEMA", "DATA MART", "REPORT", "PATH"])?;

    let total = 200;
    let mut incomplete = 0;
    for i in 0..total {
        let server = rng.pick(&servers);
        let db = rng.pick(&databases);
        let schema = rng.pick(&schemas);
        let mart = rng.pick(&marts);
        let report = format!("{} {} report {:03}", mart, rng.pick(&report_kinds), i);
        let path = format!("/{db}/{mart}/{:03}", i);

        // Blank a key field now and then so the cleaner has work to do.
        let mut record = [
            server.to_string(),
            db.to_string(),
            schema.to_string(),
            mart.to_string(),
            report,
            path,
        ];
        if rng.one_in(20) {
            record[(rng.next_u64() % 4) as usize].clear();
            incomplete += 1;
        }
        writer.write_record(&record)?;
    }
    writer.flush().context("flushing sample catalog")?;

    println!("Wrote {total} rows ({incomplete} intentionally incomplete) to {output_path}");
    Ok(())
}
