use anyhow::Result;
use asset_scripts::{cli::IconsCli, icons, logging, printer::Printer};

fn main() -> Result<()> {
    let args = IconsCli::parse();
    logging::init(args.verbose);

    let printer = Printer::default();
    icons::run(&args.options(), icons::ICON_SIZES, &printer)?;
    Ok(())
}
