use std::io::Read;

use anyhow::bail;
use butterfly_sort::{RunConfig, SortError, run_cluster};

/// Parses the textual input protocol: sample size `s`, list size `n`,
/// then `n` whitespace-separated keys.
fn parse_input(text: &str) -> Result<(usize, usize, Vec<i64>), SortError> {
    let mut tokens = text.split_whitespace();

    let sample_size: usize = tokens
        .next()
        .ok_or_else(|| SortError::Input("missing sample size".to_string()))?
        .parse()
        .map_err(|e| SortError::Input(format!("bad sample size: {}", e)))?;

    let list_size: usize = tokens
        .next()
        .ok_or_else(|| SortError::Input("missing list size".to_string()))?
        .parse()
        .map_err(|e| SortError::Input(format!("bad list size: {}", e)))?;

    let mut keys = Vec::with_capacity(list_size);
    for _ in 0..list_size {
        let key: i64 = tokens
            .next()
            .ok_or_else(|| {
                SortError::Input(format!("expected {} keys, input ended early", list_size))
            })?
            .parse()
            .map_err(|e| SortError::Input(format!("bad key: {}", e)))?;
        keys.push(key);
    }

    Ok((sample_size, list_size, keys))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut workers: Option<usize> = None;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--workers" => {
                let value = args.get(i + 1).map(|v| v.parse::<usize>());
                match value {
                    Some(Ok(count)) => workers = Some(count),
                    _ => bail!("--workers requires a positive integer"),
                }
                i += 2;
            }
            other => {
                eprintln!("Usage: {} --workers <p>", args[0]);
                eprintln!("Example: echo '8 16 ...' | {} --workers 4", args[0]);
                eprintln!("Input on stdin: <sample size> <list size> <keys...>");
                bail!("unrecognized argument: {}", other);
            }
        }
    }

    let Some(workers) = workers else {
        eprintln!("Usage: {} --workers <p>", args[0]);
        bail!("missing required --workers argument");
    };

    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text)?;
    let (sample_size, list_size, keys) = parse_input(&text)?;

    let config = RunConfig::new(workers, list_size, sample_size)?;
    let partitions = run_cluster(config, keys).await?;

    for (rank, bucket) in partitions.iter().enumerate() {
        let rendered: Vec<String> = bucket.iter().map(|k| k.to_string()).collect();
        println!("Process {} > {}", rank, rendered.join(" "));
    }

    Ok(())
}
