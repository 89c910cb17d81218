use anyhow::Result;
use asset_scripts::{cli::ExtractCli, extract, logging, printer::Printer};

fn main() -> Result<()> {
    let args = ExtractCli::parse();
    logging::init(args.verbose);

    let printer = Printer::default();
    extract::run(&args.options(), &printer)?;
    Ok(())
}
