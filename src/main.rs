fn main() -> anyhow::Result<()> {
    brrtcore::cli::run_cli()
}
