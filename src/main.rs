use std::process;

use clap::Parser;
use log::{debug, info};

use simdomain::dispatch::{perform_domain_centric, perform_string_centric};
use simdomain::strings::StringSet;

mod cli;
mod ingest;
mod output;

use cli::Args;

#[tokio::main]
async fn main() {
    pretty_env_logger::init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version are not failures
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            process::exit(code);
        }
    };

    if let Err(e) = run(args).await {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let similars = StringSet::new(&args.similar);
    let domains = ingest::collect_domains(&args).await?;
    let config = args.config();

    debug!("{:?}", config);

    let report = if args.domain_centric {
        info!(
            "domain centric analysis of {} similar(s) against {} domain(s)",
            similars.len(),
            domains.len()
        );
        perform_domain_centric(&similars, &domains, &config)
    } else {
        info!(
            "string centric analysis of {} similar(s) against {} domain(s)",
            similars.len(),
            domains.len()
        );
        perform_string_centric(&similars, &domains, &config)
    };

    let lines = output::render(&report, args.json)?;
    output::emit(&lines, args.save.as_deref())
}
