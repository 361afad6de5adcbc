use clap::Parser;
use org_stats::api::Error;
use org_stats_app::Args;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    println!("Scan GitHub organization: {} ...", args.org);
    let report = org_stats_app::scan_organization(&args).await;

    // Printed on every path, partial totals included.
    let rendered = org_stats_app::render(&report, args.json)?;
    if args.json {
        println!("{}", rendered);
    } else {
        print!("{}", rendered);
    }

    match report.abort {
        Some(err) if err.is_transport() => Err(err),
        Some(err) => {
            eprintln!("{}", err);
            Ok(())
        }
        None => Ok(()),
    }
}
