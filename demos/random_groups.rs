extern crate seatsmith;

use seatsmith::shuffle;

fn main() {
    let class = vec![
        "laurie", "lucy", "eric", "rita", "tom", "ana", "omar", "jess",
    ];
    let mut rng = rand::rng();

    match shuffle::random_groups(&class, 3, &mut rng) {
        Ok(groups) => {
            for (ix, group) in groups.iter().enumerate() {
                println!("group {}: {}", ix + 1, group.join(", "));
            }
        }
        Err(err) => eprintln!("{}", err),
    }

    if let Some(winner) = shuffle::spin(&class, &mut rng) {
        println!("the wheel picks: {}", winner);
    }
}
