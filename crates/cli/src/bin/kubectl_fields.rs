use anyhow::Result;

fn main() -> Result<()> {
    kubefields_cli::main_entry()
}
