use anyhow::{Result, bail};
use clap::Parser;
use dungeon::{BendPolicy, DungeonGenerator, DungeonTree, GenerationConfig, TileGrid};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    runs: u32,
}

fn pick(rng: &mut ChaCha8Rng, min_value: i32, max_value: i32) -> i32 {
    let span = (max_value - min_value + 1) as u64;
    min_value + (rng.next_u64() % span) as i32
}

fn random_config(rng: &mut ChaCha8Rng) -> GenerationConfig {
    let min_room_size = pick(rng, 1, 10);
    let bend_policy =
        if rng.next_u64() & 1 == 0 { BendPolicy::Randomized } else { BendPolicy::VerticalFirst };
    GenerationConfig::new(
        pick(rng, 3, 120),
        pick(rng, 3, 120),
        min_room_size,
        min_room_size + pick(rng, 0, 30),
    )
    .with_bend_policy(bend_policy)
}

fn check_invariants(tree: &DungeonTree) -> Result<(), String> {
    for (_, node) in tree.nodes() {
        let bounds = node.bounds();
        match node.children() {
            None => {
                let Some(room) = node.room() else {
                    return Err(format!("leaf {} has no room", node.id()));
                };
                if !bounds.contains_with_margin(room, 1) {
                    return Err(format!("room {room} touches leaf {} bounds {bounds}", node.id()));
                }
            }
            Some((left, right)) => {
                let (Some(left), Some(right)) = (tree.node(left), tree.node(right)) else {
                    return Err(format!("node {} has a dangling child", node.id()));
                };
                if left.bounds().area() + right.bounds().area() != bounds.area() {
                    return Err(format!("children of node {} do not cover {bounds}", node.id()));
                }
                if node.corridors().is_empty() {
                    return Err(format!("node {} joins its children without a corridor", node.id()));
                }
            }
        }
    }

    let grid = TileGrid::from_tree(tree);
    if !grid.walkable_cells_connected() {
        return Err(format!("walkable cells are disconnected:\n{grid}"));
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Starting Fuzz harness on seed {} for {} runs...", args.seed, args.runs);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    for run in 0..args.runs {
        let config = random_config(&mut rng);
        let seed = rng.next_u64();
        let tree = DungeonGenerator::new(seed, config).generate()?;
        if let Err(violation) = check_invariants(&tree) {
            bail!("Invariant failed on run {run} (seed={seed}, config={config:?}): {violation}");
        }
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}
