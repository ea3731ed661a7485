use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use sweeper_core::{CellCount, Coord, GameConfig, PlacementPolicy};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Preset {
    /// 9x9 with 10 mines
    Beginner,
    /// 16x16 with 40 mines
    Intermediate,
    /// 30x16 with 99 mines
    Expert,
}

impl Preset {
    fn config(self) -> GameConfig {
        match self {
            Self::Beginner => GameConfig::beginner(),
            Self::Intermediate => GameConfig::intermediate(),
            Self::Expert => GameConfig::expert(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Placement {
    Scan,
    Uniform,
}

impl From<Placement> for PlacementPolicy {
    fn from(other: Placement) -> Self {
        match other {
            Placement::Scan => PlacementPolicy::Scan,
            Placement::Uniform => PlacementPolicy::Uniform,
        }
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct GameArgs {
    /// Difficulty preset, replaces the size and mines from the config file
    #[arg(short, long, value_enum)]
    pub preset: Option<Preset>,

    /// Grid width
    #[arg(long)]
    pub width: Option<Coord>,

    /// Grid height
    #[arg(long)]
    pub height: Option<Coord>,

    /// Number of mines
    #[arg(short, long)]
    pub mines: Option<CellCount>,

    /// How mines are spread over the grid
    #[arg(long, value_enum)]
    pub placement: Option<Placement>,

    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,
}

/// Layers defaults, the config file, the preset and single flags, in that order.
pub(crate) fn resolve(path: Option<&Path>, args: &GameArgs) -> Result<GameConfig> {
    let mut config = match path {
        Some(path) => load(path)?,
        None => GameConfig::default(),
    };

    if let Some(preset) = args.preset {
        let preset = preset.config();
        config.size = preset.size;
        config.mines = preset.mines;
    }

    let size = (
        args.width.unwrap_or(config.size.0),
        args.height.unwrap_or(config.size.1),
    );
    let mines = args.mines.unwrap_or(config.mines);
    let validated = GameConfig::try_new(size, mines)
        .with_context(|| format!("Invalid game size {:?} with {} mines", size, mines))?;
    config.size = validated.size;
    config.mines = validated.mines;

    if let Some(placement) = args.placement {
        config.placement = placement.into();
    }

    let seed = args.seed.or(config.seed).unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);
    Ok(config.with_seed(seed))
}

fn load(path: &Path) -> Result<GameConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Could not read config file {}", path.display()))?;
    parse(&text).with_context(|| format!("Invalid config file {}", path.display()))
}

fn parse(text: &str) -> Result<GameConfig> {
    let config: GameConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_beginner_with_a_seed() {
        let config = resolve(None, &GameArgs::default()).unwrap();

        assert_eq!(config.size, (9, 9));
        assert_eq!(config.mines, 10);
        assert!(config.seed.is_some());
    }

    #[test]
    fn flags_override_preset() {
        let args = GameArgs {
            preset: Some(Preset::Expert),
            mines: Some(50),
            placement: Some(Placement::Uniform),
            seed: Some(12),
            ..Default::default()
        };

        let config = resolve(None, &args).unwrap();

        assert_eq!(config.size, (30, 16));
        assert_eq!(config.mines, 50);
        assert_eq!(config.placement, PlacementPolicy::Uniform);
        assert_eq!(config.seed, Some(12));
    }

    #[test]
    fn rejects_more_mines_than_cells() {
        let args = GameArgs {
            width: Some(3),
            height: Some(3),
            mines: Some(10),
            ..Default::default()
        };

        assert!(resolve(None, &args).is_err());
    }

    #[test]
    fn parses_toml_config() {
        let config = parse(
            r#"
            size = [16, 16]
            mines = 40
            placement = "Uniform"
            "#,
        )
        .unwrap();

        assert_eq!(
            config,
            GameConfig::intermediate().with_placement(PlacementPolicy::Uniform)
        );
    }

    #[test]
    fn toml_config_is_validated() {
        assert!(parse("size = [2, 2]\nmines = 5\n").is_err());
        assert!(parse("size = [0, 2]\nmines = 0\n").is_err());
    }
}
