use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use guide_designer::config::default_config_path;
use guide_designer::evaluation::run_batch_evaluation;
use guide_designer::export::write_guides_csv;
use guide_designer::helper_functions::clean_sequence;
use guide_designer::{
    validate_target, CasSystem, DesignParameters, DesignSession, DesignerConfig, Error,
    GuideDesigner, ScoredGuide, ScoringLimits, SequenceSource, TargetSequence, TargetStrand,
};

#[derive(Debug, Parser)]
#[command(
    name = "guide-designer",
    version = env!("CARGO_PKG_VERSION"),
    about = "CRISPR guide RNA design, scoring and validation primers"
)]
struct Cli {
    /// JSON configuration, defaults to guide_designer.json in the project root
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Find PAM-adjacent guides in a target, score and rank them
    Design(DesignCmd),
    /// Score guide sequences without a site search
    Evaluate(EvaluateCmd),
    /// Design flanking primers for validation PCR
    Primers(PrimersCmd),
    /// Write the default configuration file
    InitConfig(InitConfigCmd),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SourceArg {
    Direct,
    Gene,
    Region,
    Viewport,
}

impl From<SourceArg> for SequenceSource {
    fn from(source: SourceArg) -> Self {
        match source {
            SourceArg::Direct => SequenceSource::Direct,
            SourceArg::Gene => SequenceSource::Gene,
            SourceArg::Region => SequenceSource::Region,
            SourceArg::Viewport => SequenceSource::Viewport,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrandArg {
    Plus,
    Minus,
    Both,
}

impl From<StrandArg> for TargetStrand {
    fn from(strand: StrandArg) -> Self {
        match strand {
            StrandArg::Plus => TargetStrand::Plus,
            StrandArg::Minus => TargetStrand::Minus,
            StrandArg::Both => TargetStrand::Both,
        }
    }
}

#[derive(Debug, Args)]
struct TargetArgs {
    /// Target bases given inline
    #[arg(long, conflicts_with = "sequence_file")]
    sequence: Option<String>,
    /// Plain text or FASTA file holding the target
    #[arg(long, value_name = "FILE")]
    sequence_file: Option<PathBuf>,
    /// Chromosome the target was taken from
    #[arg(long, default_value = "")]
    chromosome: String,
    /// 1-based genomic start of the target
    #[arg(long)]
    start: Option<u64>,
    /// 1-based genomic end of the target
    #[arg(long)]
    end: Option<u64>,
    #[arg(long, value_enum, default_value_t = SourceArg::Direct)]
    source: SourceArg,
}

impl TargetArgs {
    fn resolve(&self) -> Result<TargetSequence> {
        let raw = match (&self.sequence, &self.sequence_file) {
            (Some(sequence), _) => sequence.clone(),
            (None, Some(path)) => fs::read_to_string(path)
                .with_context(|| format!("read target sequence: {}", path.display()))?,
            (None, None) => bail!("no target given, pass --sequence or --sequence-file"),
        };
        let sequence = clean_sequence(&raw);
        let source = SequenceSource::from(self.source);

        if source == SequenceSource::Region {
            if self.start.is_none() {
                return Err(Error::MissingRegionField("start").into());
            }
            if self.end.is_none() {
                return Err(Error::MissingRegionField("end").into());
            }
        }
        let start = self.start.unwrap_or(1);
        let end = self
            .end
            .unwrap_or_else(|| start + (sequence.len() as u64).saturating_sub(1));

        let target = TargetSequence::new(sequence, self.chromosome.clone(), start, end, source);
        validate_target(&target)?;
        Ok(target)
    }
}

#[derive(Debug, Args)]
struct DesignCmd {
    #[command(flatten)]
    target: TargetArgs,
    /// Nuclease preset (SpCas9, SaCas9, Cas12a, Cas13) setting PAM and guide length
    #[arg(long)]
    system: Option<String>,
    /// PAM pattern, only NGG is matched exactly
    #[arg(long)]
    pam: Option<String>,
    #[arg(long)]
    guide_length: Option<usize>,
    #[arg(long, value_enum)]
    strand: Option<StrandArg>,
    #[arg(long)]
    max_guides: Option<usize>,
    /// Minimum composite score (0.0..=1.0)
    #[arg(long)]
    min_score: Option<f64>,
    #[arg(long)]
    min_gc: Option<u32>,
    #[arg(long)]
    max_gc: Option<u32>,
    #[arg(long)]
    max_homopolymer: Option<usize>,
    /// Export the session as JSON
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,
    /// Write ranked guides as CSV
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct EvaluateCmd {
    /// One guide per line, stdin when omitted
    input: Option<PathBuf>,
    /// Treat the input as a CSV guide library and score this column
    #[arg(long, value_name = "COLUMN")]
    column: Option<String>,
    /// Scored library (CSV mode) or JSON export
    #[arg(long, short, value_name = "FILE")]
    output: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct PrimersCmd {
    #[command(flatten)]
    target: TargetArgs,
    #[arg(long)]
    length: Option<usize>,
    #[arg(long)]
    purpose: Option<String>,
    /// Export the session as JSON
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct InitConfigCmd {
    /// Destination, defaults to guide_designer.json in the project root
    path: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = DesignerConfig::load_or_default(cli.config.as_deref())
        .context("load configuration")?;
    let designer = GuideDesigner::new(config);

    match cli.command {
        Command::Design(cmd) => run_design(&designer, cmd),
        Command::Evaluate(cmd) => run_evaluate(&designer, cmd),
        Command::Primers(cmd) => run_primers(&designer, cmd),
        Command::InitConfig(cmd) => run_init_config(&designer, cmd),
    }
}

fn run_design(designer: &GuideDesigner, cmd: DesignCmd) -> Result<()> {
    let mut params = designer.config().design.clone();
    if let Some(name) = &cmd.system {
        let system = CasSystem::get(name)
            .ok_or_else(|| Error::InvalidParameter(format!("unknown nuclease system {}", name)))?;
        let preset = DesignParameters::for_system(system);
        info!(
            "Using {} preset (PAM {}, {}nt guides)",
            system.name(),
            preset.pam_pattern,
            preset.guide_length
        );
        params.pam_pattern = preset.pam_pattern;
        params.guide_length = preset.guide_length;
    }
    if let Some(pam) = cmd.pam {
        params.pam_pattern = pam;
    }
    if let Some(guide_length) = cmd.guide_length {
        params.guide_length = guide_length;
    }
    if let Some(strand) = cmd.strand {
        params.target_strand = strand.into();
    }
    if let Some(max_guides) = cmd.max_guides {
        params.max_guides = max_guides;
    }
    if let Some(min_score) = cmd.min_score {
        params.min_score_threshold = min_score;
    }
    if let Some(min_gc) = cmd.min_gc {
        params.min_gc = min_gc;
    }
    if let Some(max_gc) = cmd.max_gc {
        params.max_gc = max_gc;
    }
    if let Some(max_homopolymer) = cmd.max_homopolymer {
        params.max_homopolymer = max_homopolymer;
    }

    let target = cmd.target.resolve()?;
    info!(
        "Designing guides on {:?} strand ({}nt, PAM {}) in {}bp target",
        params.target_strand,
        params.guide_length,
        params.pam_pattern,
        target.len()
    );

    let mut session = DesignSession::new();
    session.set_target(target);
    session.run_design(designer, &params)?;

    print_guides(session.design_results(), session.target());

    if let Some(path) = &cmd.csv {
        write_guides_csv(path, session.design_results(), session.target())
            .with_context(|| format!("write {}", path.display()))?;
    }
    if let Some(path) = &cmd.json {
        session
            .export()
            .write_json(path)
            .with_context(|| format!("write {}", path.display()))?;
    }
    Ok(())
}

fn run_evaluate(designer: &GuideDesigner, cmd: EvaluateCmd) -> Result<()> {
    if let Some(column) = &cmd.column {
        let (Some(input), Some(output)) = (&cmd.input, &cmd.output) else {
            bail!("CSV evaluation needs an input library and --output");
        };
        run_batch_evaluation(
            &input.to_string_lossy(),
            column,
            &output.to_string_lossy(),
            &ScoringLimits::default(),
        )?;
        return Ok(());
    }

    let text = match &cmd.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("read guides: {}", path.display()))?,
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text).context("read guides from stdin")?;
            text
        }
    };

    let mut session = DesignSession::new();
    let results = session.run_evaluation(designer, &text);
    print_guides(results, None);

    if let Some(path) = &cmd.output {
        session
            .export()
            .write_json(path)
            .with_context(|| format!("write {}", path.display()))?;
    }
    Ok(())
}

fn run_primers(designer: &GuideDesigner, cmd: PrimersCmd) -> Result<()> {
    let mut params = designer.config().primers.clone();
    if let Some(length) = cmd.length {
        params.length = length;
    }
    if let Some(purpose) = cmd.purpose {
        params.purpose = purpose;
    }

    let mut session = DesignSession::new();
    session.set_target(cmd.target.resolve()?);
    let pair = session.run_primers(designer, &params)?;

    println!("pair\tdirection\tsequence\tlength\tgc\ttm\tproduct_size\tpurpose");
    for primer in [&pair.forward, &pair.reverse] {
        println!(
            "{}\t{:?}\t{}\t{}\t{:.1}\t{:.2}\t{}\t{}",
            pair.pair,
            primer.direction,
            primer.sequence,
            primer.length,
            primer.gc,
            primer.tm,
            pair.product_size,
            pair.purpose
        );
    }

    if let Some(path) = &cmd.json {
        session
            .export()
            .write_json(path)
            .with_context(|| format!("write {}", path.display()))?;
    }
    Ok(())
}

fn run_init_config(designer: &GuideDesigner, cmd: InitConfigCmd) -> Result<()> {
    let path = cmd.path.unwrap_or_else(default_config_path);
    designer
        .config()
        .write(&path)
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

fn print_guides(guides: &[ScoredGuide], target: Option<&TargetSequence>) {
    if guides.is_empty() {
        info!("No suitable guides found");
        return;
    }

    println!(
        "rank\tsequence\tpam\tstrand\tposition\tgenomic_position\toverall\tefficiency\t\
         specificity\tgc_content\tgc_score\tstructure\thomopolymer"
    );
    for (i, guide) in guides.iter().enumerate() {
        let s = &guide.scores;
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{:.3}\t{:.2}\t{:.2}\t{:.1}\t{:.3}\t{:.2}\t{:.2}",
            i + 1,
            guide.sequence,
            guide.pam_site.as_deref().unwrap_or("-"),
            guide.strand.map(|strand| strand.symbol()).unwrap_or('.'),
            guide.position.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string()),
            target
                .and_then(|target| guide.genomic_position(target))
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".to_string()),
            s.overall_score,
            s.efficiency_score,
            s.specificity_score,
            s.gc_content,
            s.gc_score,
            s.secondary_structure_score,
            s.homopolymer_score,
        );
    }
}
