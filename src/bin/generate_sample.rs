use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const HEADER: [&str; 12] = [
    "PassengerId",
    "Survived",
    "Pclass",
    "Name",
    "Sex",
    "Age",
    "SibSp",
    "Parch",
    "Ticket",
    "Fare",
    "Cabin",
    "Embarked",
];

const SURNAMES: [&str; 12] = [
    "Andersson", "Brown", "Carter", "Davies", "Goodwin", "Harris", "Johnson", "Kelly", "Nilsson",
    "Sage", "Smith", "Williams",
];
const MALE_NAMES: [&str; 6] = ["John", "William", "Charles", "George", "Thomas", "James"];
const FEMALE_NAMES: [&str; 6] = ["Mary", "Anna", "Elizabeth", "Margaret", "Alice", "Helen"];

/// Write a synthetic passenger manifest in the Titanic CSV layout.
#[derive(Debug, Parser)]
#[command(about, long_about = None)]
struct Args {
    /// Number of passengers to generate
    #[arg(long, default_value_t = 891)]
    count: u32,

    /// Seed for the random generator; the same seed gives the same file
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Output CSV path
    #[arg(short, long, default_value = "sample_titanic.csv")]
    output: PathBuf,
}

/// Normal sample via the Box-Muller transform.
fn gauss(rng: &mut StdRng, mean: f64, std_dev: f64) -> f64 {
    let u1: f64 = rng.random::<f64>().max(1e-15);
    let u2: f64 = rng.random();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    mean + std_dev * z
}

struct SyntheticPassenger {
    class: u8,
    female: bool,
    age: Option<f64>,
    sib_sp: u32,
    parch: u32,
}

fn generate_passenger(rng: &mut StdRng) -> SyntheticPassenger {
    let class = match rng.random::<f64>() {
        r if r < 0.24 => 1,
        r if r < 0.45 => 2,
        _ => 3,
    };
    let female = rng.random_bool(0.35);
    // Roughly one age in five is unrecorded.
    let age = if rng.random_bool(0.2) {
        None
    } else {
        let age = gauss(rng, 29.0, 14.0).clamp(0.42, 80.0);
        // Infants carry fractional ages; everyone else whole years.
        Some(if age < 1.0 {
            (age * 100.0).round() / 100.0
        } else {
            age.round()
        })
    };
    let sib_sp = if rng.random_bool(0.3) {
        rng.random_range(1..=4_u32)
    } else {
        0
    };
    let parch = if rng.random_bool(0.25) {
        rng.random_range(1..=3_u32)
    } else {
        0
    };

    SyntheticPassenger {
        class,
        female,
        age,
        sib_sp,
        parch,
    }
}

fn survival_probability(p: &SyntheticPassenger) -> f64 {
    let mut prob: f64 = if p.female { 0.72 } else { 0.19 };
    prob += match p.class {
        1 => 0.18,
        2 => 0.05,
        _ => -0.1,
    };
    if p.age.is_some_and(|a| a < 18.0) {
        prob += 0.15;
    }
    let family_size = p.sib_sp + p.parch + 1;
    if family_size > 4 {
        prob -= 0.2;
    }
    prob.clamp(0.02, 0.98)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut rng = StdRng::seed_from_u64(args.seed);

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    writer.write_record(HEADER)?;
    log::info!("generating {} passengers with seed {}", args.count, args.seed);

    for id in 1..=args.count {
        let p = generate_passenger(&mut rng);
        let survived = rng.random_bool(survival_probability(&p));

        let surname = SURNAMES[rng.random_range(0..SURNAMES.len())];
        let (title, given) = if p.female {
            let title = if p.age.is_some_and(|a| a < 18.0) { "Miss." } else { "Mrs." };
            (title, FEMALE_NAMES[rng.random_range(0..FEMALE_NAMES.len())])
        } else {
            let title = if p.age.is_some_and(|a| a < 13.0) { "Master." } else { "Mr." };
            (title, MALE_NAMES[rng.random_range(0..MALE_NAMES.len())])
        };

        let base_fare = match p.class {
            1 => 84.0,
            2 => 20.0,
            _ => 13.0,
        };
        let fare = gauss(&mut rng, base_fare, base_fare * 0.4).max(0.0);
        let cabin = if p.class == 1 || rng.random_bool(0.05) {
            let deck = ['A', 'B', 'C', 'D', 'E'][rng.random_range(0..5_usize)];
            format!("{deck}{}", rng.random_range(1..=130_u32))
        } else {
            String::new()
        };
        let embarked = match rng.random::<f64>() {
            r if r < 0.002 => "",
            r if r < 0.19 => "C",
            r if r < 0.28 => "Q",
            _ => "S",
        };

        writer.write_record([
            id.to_string(),
            u8::from(survived).to_string(),
            p.class.to_string(),
            format!("{surname}, {title} {given}"),
            if p.female { "female" } else { "male" }.to_string(),
            p.age.map(|a| a.to_string()).unwrap_or_default(),
            p.sib_sp.to_string(),
            p.parch.to_string(),
            rng.random_range(100_000..400_000_u32).to_string(),
            format!("{fare:.4}"),
            cabin,
            embarked.to_string(),
        ])?;
    }
    writer.flush()?;

    println!(
        "Wrote {} passengers to {}",
        args.count,
        args.output.display()
    );
    Ok(())
}
