use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ontograph_core::normalizer::text::{load_normal_forms, save_normal_forms};
use ontograph_core::{
    Config, NormalFormCache, NormalFormKind, Normalization, Normalizer, Ontology,
    ProjectionDriver, ProjectorRegistry, SymbolTables,
};

#[derive(Parser)]
#[command(name = "ontograph")]
#[command(about = "Project ontologies into normal forms and typed edge graphs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project an ontology to a tab-separated edge list
    Project {
        /// Ontology JSON snapshot
        ontology: PathBuf,
        /// Strategy name or alias (defaults to the configured strategy)
        #[arg(short, long)]
        strategy: Option<String>,
        /// Also emit superClassOf edges
        #[arg(long)]
        bidirectional: bool,
        /// Do not descend into restriction fillers
        #[arg(long)]
        only_taxonomy: bool,
        /// Emit annotation literals (owl2vec_star)
        #[arg(long)]
        include_literals: bool,
        /// Write edges here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Normalize an ontology into NF1..NF4
    Normalize {
        /// Ontology JSON snapshot
        ontology: PathBuf,
        /// Write the normal-form text file here
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Classify an existing normal-form text file
    Classify {
        /// One `<left> SubClassOf <right>` axiom per line
        file: PathBuf,
    },
    /// List registered projection strategies
    Strategies,
    /// Print the default configuration
    Config,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Project {
            ontology,
            strategy,
            bidirectional,
            only_taxonomy,
            include_literals,
            output,
        } => {
            let config = Config::load()?;
            let ontology = read_ontology(&ontology)?;

            let mut projection = config.projection.to_projection_config();
            projection.bidirectional_taxonomy |= bidirectional;
            projection.only_taxonomy |= only_taxonomy;
            projection.include_literals |= include_literals;
            let strategy = strategy.unwrap_or(config.projection.strategy);

            let driver = ProjectionDriver::new();
            let result = driver.run(&ontology, &strategy, &projection)?;

            let written = match output {
                Some(path) => {
                    let file = fs::File::create(&path)
                        .wrap_err_with(|| format!("Failed to create {}", path.display()))?;
                    result.edges.write_edgelist(BufWriter::new(file))?
                }
                None => result.edges.write_edgelist(io::stdout().lock())?,
            };

            eprintln!("{} edges ({})", written, result.stats);
        }
        Commands::Normalize { ontology, output } => {
            let config = Config::load()?;
            let ontology = read_ontology(&ontology)?;
            let mut normalizer = Normalizer::new().with_config(&config.normalizer);

            if let Some(path) = &output {
                let lines = save_normal_forms(path, &ontology)?;
                info!(path = %path.display(), lines, "wrote normal forms");
            }

            let normalization = if config.cache.enabled {
                let cache = NormalFormCache::with_config(&config.cache);
                match cache.load_or_create(&ontology, &mut normalizer) {
                    Ok(n) => n,
                    Err(e) => {
                        warn!(error = %e, "normal-form cache unavailable, normalizing in memory");
                        normalizer.normalize_store(&ontology)
                    }
                }
            } else {
                normalizer.normalize_store(&ontology)
            };

            print_normalization(io::stdout().lock(), &normalization, normalizer.tables())?;
        }
        Commands::Classify { file } => {
            let config = Config::load()?;
            let mut normalizer = Normalizer::new().with_config(&config.normalizer);
            let normalization = load_normal_forms(&file, &mut normalizer)?;
            print_normalization(io::stdout().lock(), &normalization, normalizer.tables())?;
        }
        Commands::Strategies => {
            let registry = ProjectorRegistry::new();
            println!("Strategies:");
            for (name, aliases, description) in registry.list_strategies() {
                if aliases.is_empty() {
                    println!("  {:<14} {}", name, description);
                } else {
                    println!("  {:<14} {} (aliases: {})", name, description, aliases.join(", "));
                }
            }
        }
        Commands::Config => {
            print!("{}", Config::default_config_string());
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_ontology(path: &Path) -> Result<Ontology> {
    let json = fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    Ontology::from_json(&json).wrap_err_with(|| format!("Failed to parse {}", path.display()))
}

fn print_normalization<W: Write>(
    mut out: W,
    normalization: &Normalization,
    tables: &SymbolTables,
) -> io::Result<()> {
    write!(out, "{}", normalization.summary)?;
    writeln!(out, "Tables:")?;
    writeln!(out, "  Classes:      {}", tables.classes.len())?;
    writeln!(out, "  Relations:    {}", tables.relations.len())?;
    for kind in NormalFormKind::ALL {
        writeln!(out, "  {} tuples:   {}", kind, normalization.forms.len(kind))?;
    }
    for issue in &normalization.summary.issues {
        writeln!(out, "  dropped #{}: {}", issue.index, issue.rendered)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_print_normalization() {
        let mut normalizer = Normalizer::new();
        let normalization =
            normalizer.normalize_store(&Ontology::new("http://o").subclass_of("A", "B"));

        let mut buf = Vec::new();
        print_normalization(&mut buf, &normalization, normalizer.tables()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Classes:      2"));
    }

    #[test]
    fn test_print_normalization_reports_write_errors() {
        let mut normalizer = Normalizer::new();
        let normalization =
            normalizer.normalize_store(&Ontology::new("http://o").subclass_of("A", "B"));

        let err = print_normalization(ClosedPipe, &normalization, normalizer.tables()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
