fn main() -> anyhow::Result<()> {
    thread_dump_analyzer::cli::run()
}
