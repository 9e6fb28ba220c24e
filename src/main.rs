use anyhow::{bail, Context, Result};
use healthbot::config::{init_logging, Config};
use healthbot::{AdviceEngine, Bmi, ConditionId, Severity, DISCLAIMER};
use std::env;

fn main() -> Result<()> {
    let mut config = Config::from_env()?;
    let args: Vec<String> = env::args().skip(1).collect();
    let args = config.apply_args(&args)?;

    match args.first().map(String::as_str) {
        Some("advice") => {
            init_logging();
            run_advice(&args[1..])?;
        }
        Some("bmi") => {
            init_logging();
            run_bmi(&args[1..])?;
        }
        Some("conditions") => run_conditions(),
        Some(other) => bail!("Unknown command: {} (expected advice, bmi or conditions)", other),
        None => run_ui_mode(&config)?,
    }

    Ok(())
}

fn run_conditions() {
    println!("🧾 Conditions");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for condition in ConditionId::ALL {
        println!("  {:<22} {}", condition.slug(), condition.label());
    }
}

fn run_advice(args: &[String]) -> Result<()> {
    if args.is_empty() {
        bail!("Usage: healthbot advice <condition>");
    }

    // Allow unquoted multi-word labels: `advice High Blood Pressure`
    let name = args.join(" ");
    let advice = AdviceEngine::new().lookup_str(&name)?;
    tracing::debug!(condition = %name, lines = advice.len(), "advice lookup");

    println!("{}", DISCLAIMER);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for line in &advice {
        match line.severity() {
            Severity::Warning => println!("[WARNING] {}", line.text()),
            Severity::Success => println!("[OK]      {}", line.text()),
            Severity::Info => println!("          {}", line.text()),
        }
    }

    Ok(())
}

fn run_bmi(args: &[String]) -> Result<()> {
    let [height, weight] = args else {
        bail!("Usage: healthbot bmi <height_m> <weight_kg>");
    };

    let height: f64 = height.parse().with_context(|| format!("Invalid height: {}", height))?;
    let weight: f64 = weight.parse().with_context(|| format!("Invalid weight: {}", weight))?;

    let bmi = Bmi::calculate(height, weight)?;
    println!("🧮 {}", bmi);
    println!("   {}", bmi.category.label());

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(config: &Config) -> Result<()> {
    use healthbot::ui;
    use healthbot::{HealthDataset, UploadedReport};

    println!("🖥️  Loading HealthBot Dashboard...\n");

    if !config.data_path.exists() {
        eprintln!("❌ Dataset not found: {:?}", config.data_path);
        eprintln!("   Set HEALTHBOT_DATA or pass --data <path.csv>");
        std::process::exit(1);
    }

    let dataset = HealthDataset::load(&config.data_path)
        .with_context(|| format!("Failed to load dataset {:?}", config.data_path))?;
    let report = config.report_path.as_ref().map(UploadedReport::from_path);

    println!("✓ Loaded {} health records\n", dataset.len());
    println!("Starting UI... (Press 'q' to quit)\n");

    let mut app = ui::App::new(dataset).with_report(report);
    ui::run_ui(&mut app)?;

    println!("\n✅ UI closed successfully");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_config: &Config) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use web UI: cargo run --bin healthbot-server --features server");
    std::process::exit(1);
}
