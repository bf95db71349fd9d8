use clap::Parser;
use mcp_manager_lib::cli::{Cli, Commands};
use mcp_manager_lib::AppError;
use std::process;

fn main() {
    let cli = Cli::parse();

    // 默认只显示错误日志，避免干扰命令输出；RUST_LOG 可覆盖
    let log_level = if cli.verbose { "debug" } else { "error" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    use mcp_manager_lib::cli::commands::{config, mcp};

    match cli.command {
        // Default to interactive mode if no command is provided
        None | Some(Commands::Interactive) => mcp_manager_lib::cli::interactive::run(),
        Some(Commands::LoadCommand { copy }) => config::load_command(copy),
        Some(Commands::SaveCommand { input, copy }) => config::save_command(&input, copy),
        Some(Commands::Export { input, dir }) => config::export(&input, dir),
        Some(Commands::Servers { input }) => mcp::list_servers(&input),
        Some(Commands::Set {
            input,
            server,
            assignments,
            copy,
        }) => mcp::set_variables(&input, &server, &assignments, copy),
        Some(Commands::Delete {
            input,
            server,
            copy,
        }) => mcp::delete_server(&input, &server, copy),
        Some(Commands::Completions { shell }) => {
            mcp_manager_lib::cli::generate_completions(shell);
            Ok(())
        }
    }
}
