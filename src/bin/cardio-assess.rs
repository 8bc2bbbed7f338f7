//! Cardio risk assessment form (terminal front-end)

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use cardio_risk::config::Config;
use cardio_risk::model::{Classifier, ModelHandle, RiskModel};
use cardio_risk::pipeline;
use cardio_risk::presenter::Assessment;
use cardio_risk::schema::{Activity, Gender, Level, PatientInput, YesNo};

#[derive(Parser)]
#[command(name = "cardio-assess")]
#[command(version)]
#[command(about = "Cardiovascular disease risk assessment", long_about = None)]
struct Cli {
    /// Model artifact (overrides MODEL_PATH; defaults to the bundled model)
    #[arg(short, long, global = true, value_name = "MODEL")]
    model: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill in the form and predict risk
    Assess(FormArgs),

    /// Show the loaded model and its feature names
    Inspect,
}

#[derive(clap::Args)]
struct FormArgs {
    /// Age (years)
    #[arg(long, default_value_t = 40, value_parser = clap::value_parser!(i32).range(1..=120))]
    age: i32,

    /// Gender: Male | Female
    #[arg(long, default_value = "Male")]
    gender: Gender,

    /// Height (cm)
    #[arg(long, default_value_t = 170, value_parser = clap::value_parser!(i32).range(100..=250))]
    height: i32,

    /// Weight (kg)
    #[arg(long, default_value_t = 70.0, value_parser = parse_weight)]
    weight: f64,

    /// Systolic BP (high)
    #[arg(long, default_value_t = 120, value_parser = clap::value_parser!(i32).range(90..=180))]
    ap_hi: i32,

    /// Diastolic BP (low)
    #[arg(long, default_value_t = 80, value_parser = clap::value_parser!(i32).range(60..=110))]
    ap_lo: i32,

    /// Cholesterol level: Normal | Above Normal | Well Above Normal
    #[arg(long, default_value = "Normal")]
    cholesterol: Level,

    /// Glucose level: Normal | Above Normal | Well Above Normal
    #[arg(long, default_value = "Normal")]
    glucose: Level,

    /// Smoking: No | Yes
    #[arg(long, default_value = "No")]
    smoking: YesNo,

    /// Alcohol intake: No | Yes
    #[arg(long, default_value = "No")]
    alcohol: YesNo,

    /// Physical activity: Inactive | Active
    #[arg(long, default_value = "Active")]
    activity: Activity,
}

impl FormArgs {
    fn to_input(&self) -> PatientInput {
        PatientInput {
            age: self.age,
            gender: self.gender,
            height_cm: self.height,
            weight_kg: self.weight,
            ap_hi: self.ap_hi,
            ap_lo: self.ap_lo,
            cholesterol: self.cholesterol,
            gluc: self.glucose,
            smoke: self.smoking,
            alco: self.alcohol,
            active: self.activity,
        }
    }
}

fn parse_weight(s: &str) -> Result<f64, String> {
    let weight: f64 = s.parse().map_err(|_| format!("'{}' is not a number", s))?;
    if !(30.0..=200.0).contains(&weight) {
        return Err(format!("{} is not in 30..=200", weight));
    }
    Ok(weight)
}

/// Load with the same checksum and layout pin the server enforces
fn load_model(config: &Config) -> Result<Arc<Classifier>> {
    let handle = ModelHandle::load(config).context("Model schema rejected")?;
    match handle.classifier() {
        Some(classifier) => Ok(Arc::clone(classifier)),
        None => bail!("Model not loaded: {}", handle.reason().unwrap_or("unknown reason")),
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    cardio_risk::init_tracing("cardio_risk=warn", false);

    let cli = Cli::parse();

    let mut config = Config::from_env().context("Invalid configuration")?;
    if let Some(path) = cli.model {
        config.model_path = path;
    }
    let classifier = load_model(&config)?;

    match cli.command {
        Commands::Assess(form) => {
            let outcome = pipeline::run(classifier.as_ref(), &form.to_input())
                .context("Prediction error")?;
            print!("{}", Assessment::new(&outcome.prediction, &outcome.derived).render());
        }
        Commands::Inspect => {
            let info = classifier.info();
            println!("Model:      {} ({})", info.path, info.model_type.as_str());
            println!("Version:    {}", info.version.as_deref().unwrap_or("-"));
            println!("SHA-256:    {}", info.sha256);
            println!("Threshold:  {}", info.threshold);
            println!(
                "Layout:     {} ({} features, hash {:08x})",
                info.layout.kind.map(|k| k.to_string()).unwrap_or_else(|| "custom".to_string()),
                info.layout.feature_count,
                info.layout.hash
            );
            println!("Feature names in model:");
            for name in classifier.schema().names() {
                println!("  {}", name);
            }
        }
    }

    Ok(())
}
