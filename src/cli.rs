use ticket_search::Cli;

fn main() -> anyhow::Result<()> {
    Cli::run()
}
