extern crate seatsmith;

use std::{env, process};

use seatsmith::plan_builder::PlanBuilder;
use seatsmith::transfer;

use thiserror::Error;

#[derive(Error, Debug)]
enum Error {
    #[error("failed to parse class file")]
    Parsing(#[from] transfer::ClassFileError),
    #[error("placement failed")]
    Placement(#[from] seatsmith::engine::PlacementError),
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let result = match args.len() {
        1 => run_builtin(),
        2 => run_file(args.get(1).unwrap()),
        _ => {
            eprintln!("seating_plan [path to class file]");
            process::exit(-1);
        }
    };
    if let Err(err) = result {
        eprintln!("{}", err);
        process::exit(-1);
    }
}

// Seats a small built-in class when no file is given
fn run_builtin() -> Result<(), Error> {
    let mut builder = PlanBuilder::new();

    let laurie = builder.student("laurie");
    let lucy = builder.student("lucy");
    let eric = builder.student("eric");
    let rita = builder.student("rita");
    builder.student("tom");
    builder.student("ana");

    builder.table(3);
    builder.table(3);

    builder.together(laurie, lucy);
    builder.separate(eric, rita);

    let placement = builder.build()?.place()?;
    println!("{:?}", placement);
    Ok(())
}

fn run_file(path: &str) -> Result<(), Error> {
    let planner = transfer::parse(path)?;
    let placement = planner.place()?;
    println!("{:?}", placement);
    if placement.degraded() {
        eprintln!("some constraints could not be honoured");
    }
    Ok(())
}
