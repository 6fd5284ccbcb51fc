use std::collections::hash_map::DefaultHasher;
use std::hash::Hash;
use std::hash::Hasher;

use clap::Parser;
use shift_hash::Config;
use shift_hash::HashTable;
use shift_hash::hash_table::Entry;

#[derive(Parser, Debug)]
struct Args {
    /// Number of entries to insert.
    #[arg(short = 'n', long = "entries", default_value_t = 1000)]
    entries: usize,

    /// Fraction of the inserted entries to remove afterwards.
    #[arg(short = 'r', long = "remove_fraction", default_value_t = 0.0)]
    remove_fraction: f64,

    /// Largest bucket count the table may grow to.
    #[arg(short = 'm', long = "max_capacity")]
    max_capacity: Option<usize>,
}

fn hash_u64(value: u64) -> u32 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    let hash = hasher.finish();
    (hash ^ (hash >> 32)) as u32
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut config = Config::default();
    if let Some(max_capacity) = args.max_capacity {
        config = config.with_max_capacity(max_capacity);
    }
    let mut table: HashTable<u64, u64> = HashTable::with_config(config);

    println!("Filling table with {} u64 keys...", args.entries);

    let mut num_failures = 0;
    for i in 0..args.entries {
        let key = i as u64;
        let hash = hash_u64(key);

        match table.try_entry(hash, |&k| k == key) {
            Ok(Entry::Vacant(entry)) => {
                entry.insert(key, key * 2);
            }
            Ok(Entry::Occupied(_)) => {
                panic!("Key already exists in table: {}", key);
            }
            Err(error) => {
                if num_failures == 0 {
                    println!("Table stopped growing: {}", error);
                }
                num_failures += 1;
            }
        }
    }

    let to_remove = (table.len() as f64 * args.remove_fraction.clamp(0.0, 1.0)) as usize;
    let mut removed = 0;
    for key in (0..args.entries as u64).step_by(2).chain((1..args.entries as u64).step_by(2)) {
        if removed == to_remove {
            break;
        }
        if table.remove(hash_u64(key), |&k| k == key).is_some() {
            removed += 1;
        }
    }

    println!("Inserted {} keys, removed {}", table.len() + removed, removed);
    println!("Capacity: {}", table.capacity());

    table.probe_histogram().print();
    table.debug_stats().print();
    println!(
        "Number of failed try_entry attempts: {} ({:.02}%)",
        num_failures,
        if args.entries == 0 {
            0.0
        } else {
            num_failures as f64 / args.entries as f64 * 100.0
        }
    );

    match table.check_consistency(|&k| hash_u64(k), |a, b| a == b) {
        Ok(()) => println!("Consistency check passed"),
        Err(error) => println!("Consistency check FAILED: {}", error),
    }
}
