use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use recite::{
    quick_check::quick_check, report, text::validate_expected_text, Assessment, AudioClip,
    ConfigStore, FeedbackComposer, FileConfigStore, FixedTranscript, Level, PracticeSet,
    ProficiencyEngine, TranscriberChain,
};
use std::{error::Error, io, path::PathBuf};

/// score a read-aloud attempt for pronunciation and fluency
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Scores a learner reading a sentence aloud: word-by-word pronunciation against the transcript, fluency from pauses and pace in the recording, and an overall score with feedback."
)]
pub struct Cli {
    /// sentence the reader was asked to read
    #[clap(short = 'e', long, conflicts_with = "level")]
    expected: Option<String>,

    /// draw the sentence from a practice level (beginner, intermediate)
    #[clap(short = 'l', long)]
    level: Option<Level>,

    /// recognised text; repeat to list fallback recognisers in order
    #[clap(short = 't', long = "transcript")]
    transcripts: Vec<String>,

    /// WAV recording of the reading
    #[clap(short = 'a', long)]
    audio: Option<PathBuf>,

    /// seed the random draws (encouragement line, practice sentence)
    #[clap(long)]
    seed: Option<u64>,

    /// output format
    #[clap(short = 'f', long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// scoring config file (defaults to the platform config directory)
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// only compare the first transcript against the sentence
    #[clap(long)]
    quick: bool,
}

#[derive(Debug, Copy, Clone, ValueEnum, strum_macros::Display)]
pub enum OutputFormat {
    Json,
    Csv,
}

impl Cli {
    fn expected_text<R: Rng>(&self, rng: &mut R) -> Result<String, Box<dyn Error>> {
        if let Some(ref text) = self.expected {
            return Ok(text.clone());
        }
        let Some(level) = self.level else {
            let mut cmd = Cli::command();
            cmd.error(
                ErrorKind::MissingRequiredArgument,
                "one of --expected or --level is required",
            )
            .exit();
        };
        let set = PracticeSet::for_level(level)?;
        let sentence = set.pick(rng).ok_or("practice set is empty")?;
        info!("practising {level} sentence: {sentence}");
        Ok(sentence.to_string())
    }

    fn transcriber_chain(&self) -> TranscriberChain {
        let mut chain = TranscriberChain::new();
        for (i, text) in self.transcripts.iter().enumerate() {
            chain.push(Box::new(FixedTranscript::new(
                format!("transcript {}", i + 1),
                text.clone(),
            )));
        }
        chain
    }

    fn load_audio(&self) -> Option<AudioClip> {
        let path = self.audio.as_ref()?;
        match AudioClip::from_wav(path) {
            Ok(clip) => Some(clip),
            Err(err) => {
                warn!("scoring without audio: {err}");
                None
            }
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let expected = cli.expected_text(&mut rng)?;
    validate_expected_text(&expected)?;

    if cli.quick {
        let transcript = cli.transcripts.first().map(String::as_str).unwrap_or("");
        serde_json::to_writer_pretty(io::stdout().lock(), &quick_check(&expected, transcript))?;
        println!();
        return Ok(());
    }

    let store = match cli.config {
        Some(ref path) => FileConfigStore::with_path(path),
        None => FileConfigStore::new(),
    };
    let engine = ProficiencyEngine::new(store.load()?)?;

    let audio = cli.load_audio();
    let analysis = engine.assess(&expected, audio.as_ref(), &cli.transcriber_chain());
    let composer = match cli.seed {
        Some(seed) => FeedbackComposer::seeded(seed),
        None => FeedbackComposer::from_entropy(),
    };
    let feedback = composer
        .with_rate_thresholds(engine.config().slow_rate_wpm, engine.config().fast_rate_wpm)
        .compose(&analysis);
    let assessment = Assessment { analysis, feedback };

    match cli.format {
        OutputFormat::Json => {
            report::write_json(io::stdout().lock(), &assessment)?;
            println!();
        }
        OutputFormat::Csv => report::write_csv(io::stdout().lock(), &assessment)?,
    }

    Ok(())
}
