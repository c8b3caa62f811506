use anyhow::Context;
use saray_admin::console::{self, Command, Outcome};
use saray_admin::{AdminApp, Config, FileSessionStore, PasswordCheck, SessionGate};
use saray_client::RestClient;
use std::io::Write;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // `saray-admin hash-password <password>` prints a value for ADMIN_PASSWORD_HASH
    let args: Vec<String> = std::env::args().collect();
    if let [_, cmd, password] = args.as_slice()
        && cmd == "hash-password"
    {
        println!("{}", PasswordCheck::hash(password)?);
        return Ok(());
    }

    // 1. Environment (.env, work dir, logging)
    dotenv::dotenv().ok();
    let config = Config::from_env();
    saray_admin::setup_environment(&config).context("failed to set up work directory")?;
    saray_admin::print_banner();

    // 2. Remote client and session
    let client = RestClient::new(&config.client_config()?)?;
    tracing::info!(base_url = client.base_url(), "Saray admin starting");
    let gate = SessionGate::new(
        config.password_check()?,
        FileSessionStore::new(&config.work_dir),
    );

    let mut app = AdminApp::new(Arc::new(client), gate);
    app.load().await?;
    if let Some(panel) = app.panel() {
        print!("{}", console::render_panel(panel));
    } else {
        println!("Log in with: login <password>");
    }

    // 3. Command loop
    loop {
        print!("saray> ");
        std::io::stdout().flush()?;
        let Some(line) = read_line()? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        let mut ask = |prompt: &str| {
            print!("{prompt} [y/N] ");
            let _ = std::io::stdout().flush();
            match read_line() {
                Ok(Some(answer)) => matches!(answer.trim(), "y" | "Y" | "yes" | "e" | "evet"),
                _ => false,
            }
        };

        match console::execute(&mut app, command, &mut ask).await {
            Ok(Outcome::Print(text)) => println!("{}", text.trim_end()),
            Ok(Outcome::Quit) => break,
            Err(e) => {
                tracing::debug!(code = %e.code(), error = %e, "Command failed");
                println!("{e}");
            }
        }
    }

    tracing::info!("Saray admin stopped");
    Ok(())
}

/// One line from stdin, `None` at end of input
fn read_line() -> std::io::Result<Option<String>> {
    let mut line = String::new();
    if std::io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}
