use chrono::Utc;
use habitkit_core::{seed, Calendar, Database};

pub fn run(rng_seed: u64, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let cal = Calendar::utc();
    let now = Utc::now();

    let created = if force {
        seed::seed_demo(&db, &cal, now, rng_seed)?
    } else {
        seed::seed_if_needed(&db, &cal, now, rng_seed)?
    };

    if created == 0 {
        println!("database already has tasks; use --force to seed anyway");
    } else {
        println!("seeded {created} demo task(s)");
    }
    Ok(())
}
