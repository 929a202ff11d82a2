use time::macros::format_description;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::EnvFilter;

pub fn setup_logging(verbose: bool) {
    let default_directives = if verbose { "info" } else { "error" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    // Logs go to stderr so stdout stays clean for the report.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(LocalTime::new(format_description!(
            "[hour]:[minute]:[second]"
        )))
        .with_writer(std::io::stderr)
        .init();
}

/// Group the integer digits of a value in threes and keep any fractional
/// digits as-is: 1234567.5 -> "1,234,567.5". Display-only; the core hands
/// back raw numbers.
pub fn format_value(value: f64) -> String {
    let rendered = if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    };

    match rendered.split_once('.') {
        Some((integer, fraction)) => format!("{}.{}", group_thousands(integer), fraction),
        None => group_thousands(&rendered),
    }
}

fn group_thousands(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };

    let grouped = digits
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap())
        .collect::<Vec<_>>()
        .join(",");

    format!("{}{}", sign, grouped)
}

pub fn validate_args(args: &crate::args::Args) -> anyhow::Result<()> {
    if args.max_size_mb == 0 {
        anyhow::bail!("--max-size-mb must be greater than 0");
    }

    if let Some(filter) = &args.filter {
        if filter.trim().is_empty() {
            anyhow::bail!("--filter must not be empty");
        }
    }

    Ok(())
}
