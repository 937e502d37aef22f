//! Walkthrough: narrowing a type domain under accumulating constraints.
//!
//! Builds a small boxed-numeric universe, then plays the role of a sequence
//! generator that discovers constraints one at a time and narrows a domain
//! until a concrete candidate can be enumerated.
//!
//! Run with:
//! ```bash
//! cargo run --example narrowing -- --verbose
//! ```

use clap::Parser;

use typedom_rs::domain::TypeDomain;
use typedom_rs::oracle::SubtypeOracle;
use typedom_rs::table::TypeTable;
use typedom_rs::typeset::TypeSet;

#[derive(Parser)]
struct Args {
    /// Log every restriction step.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    simplelog::TermLogger::init(
        if args.verbose {
            simplelog::LevelFilter::Debug
        } else {
            simplelog::LevelFilter::Info
        },
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    // Integer <: Number, Double <: Number, Integer <: Comparable<Integer>.
    let mut table = TypeTable::new();
    let comparable = table.declare_generic("Comparable");
    let number = table.declare("Number");
    let integer = table.declare("Integer");
    let double = table.declare("Double");
    let string = table.declare("String");
    let comp_int = table.instantiate(comparable, "Comparable<Integer>");
    table.add_supertype(integer, number);
    table.add_supertype(double, number);
    table.add_supertype(integer, comp_int);

    // The closure builder supplies the candidate pool.
    let mut seen = TypeSet::new();
    seen.add(integer, &table)?;
    seen.add(double, &table)?;
    seen.add(string, &table)?;
    println!("registered {} types:", seen.len());
    for t in seen.iter() {
        println!("- {}", table.name(t));
    }
    println!(
        "instantiations of Comparable: {:?}",
        seen.match_generic(comparable, &table)
            .into_iter()
            .map(|t| table.name(t).to_string())
            .collect::<Vec<_>>()
    );

    // Constraints arrive one at a time.
    let pool = seen.to_domain();
    println!("pool = {}", pool);

    let step1 = pool.restrict_down(number, &table);
    println!("below Number: {}", step1);

    let step2 = step1.restrict_down_domain(
        &TypeDomain::interval(table.bottom(), comp_int, &table),
        &table,
    );
    println!("also below Comparable<Integer>: {}", step2);

    match step2.iter() {
        Some(members) => {
            for t in members {
                println!("candidate: {}", table.name(t));
            }
        }
        None => println!("domain is not enumerable yet"),
    }

    Ok(())
}
