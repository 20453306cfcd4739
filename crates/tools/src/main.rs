use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use dungeon::{
    BendPolicy, DungeonGenerator, GenerationConfig, GenerationEvent, TileGrid, TileKind,
    derive_dungeon_seed,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BendArg {
    Randomized,
    VerticalFirst,
}

impl From<BendArg> for BendPolicy {
    fn from(value: BendArg) -> Self {
        match value {
            BendArg::Randomized => Self::Randomized,
            BendArg::VerticalFirst => Self::VerticalFirst,
        }
    }
}

#[derive(Parser)]
#[command(author, version, long_about = None)]
/// Generate a BSP dungeon and print it as ASCII
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Number of dungeons to generate, each seeded from `--seed` and its index
    #[arg(short = 'n', long, default_value_t = 1)]
    count: u32,
    /// TOML or JSON file with generation parameters; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long)]
    width: Option<i32>,
    #[arg(long)]
    height: Option<i32>,
    #[arg(long)]
    min_room: Option<i32>,
    #[arg(long)]
    max_room: Option<i32>,
    #[arg(long, value_enum)]
    bend: Option<BendArg>,
    /// Print every generation event before the map
    #[arg(long)]
    events: bool,
}

impl Args {
    fn resolve_config(&self) -> Result<GenerationConfig> {
        let mut config = match &self.config {
            Some(path) => GenerationConfig::load(path)
                .with_context(|| format!("Failed to load config file: {}", path.display()))?,
            None => GenerationConfig::default(),
        };
        config.board_width = self.width.unwrap_or(config.board_width);
        config.board_height = self.height.unwrap_or(config.board_height);
        config.min_room_size = self.min_room.unwrap_or(config.min_room_size);
        config.max_room_size = self.max_room.unwrap_or(config.max_room_size);
        if let Some(bend) = self.bend {
            config.bend_policy = bend.into();
        }
        config.validate().context("Invalid generation parameters")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.resolve_config()?;

    for index in 0..args.count {
        let seed = if args.count == 1 { args.seed } else { derive_dungeon_seed(args.seed, index) };
        let generator = DungeonGenerator::new(seed, config);
        let mut events: Vec<GenerationEvent> = Vec::new();
        let tree = generator
            .generate_with_events(&mut events)
            .with_context(|| format!("Generation failed for seed {seed}"))?;

        if args.events {
            for event in &events {
                println!("{event:?}");
            }
        }

        let grid = TileGrid::from_tree(&tree);
        let config = generator.config();
        println!("Seed: {}", generator.seed());
        println!(
            "Board: {}x{} (rooms {}..={}, bends {:?})",
            config.board_width,
            config.board_height,
            config.min_room_size,
            config.max_room_size,
            config.bend_policy
        );
        println!("Leaves: {}", tree.leaf_count());
        let strips = tree.corridors().filter(|strip| !strip.is_empty()).count();
        println!("Corridor strips: {strips}");
        println!(
            "Cells: floor={} corridor={}",
            grid.count(TileKind::Floor),
            grid.count(TileKind::Corridor)
        );
        println!("Fingerprint: {:016x}", tree.fingerprint());
        println!("{grid}");
    }

    Ok(())
}
