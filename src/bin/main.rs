use ai_commit::ai::OllamaClient;
use ai_commit::commit::{create_commit, should_commit, CommitOptions};
use ai_commit::config::{file, Config};
use ai_commit::progress::Spinner;
use ai_commit::{get_staged_changes, logging, open_repository, run, Args, Outcome};
use colored::*;
use dotenv::dotenv;
use std::{env, process};

fn fail(context: &str, error: impl std::fmt::Display) -> ! {
    eprintln!("{}", context.red().bold());
    eprintln!("{}", error);
    process::exit(1);
}

/// Keep stdout clean for `git commit -F` when only the message is wanted.
fn diagnostic(message_only: bool, line: String) {
    if message_only {
        eprintln!("{}", line);
    } else {
        println!("{}", line);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv().ok(); // Load .env file if it exists
    let args = Args::new_from(env::args());
    logging::init(args.verbose);

    if args.init_config {
        match file::create_config_file(args.config_path.as_deref()) {
            Ok(path) => println!("Created configuration file at {}", path.display()),
            Err(e) => fail("Error creating configuration file:", e),
        }
        return;
    }

    let repo = match open_repository(&args.repo) {
        Ok(repo) => repo,
        Err(e) => fail("Error opening git repository:", e),
    };

    let config = match Config::load(&args, repo.workdir()) {
        Ok(config) => config,
        Err(e) => fail("Error loading configuration:", e),
    };

    let changes = match get_staged_changes(&repo, config.max_diff_chars) {
        Ok(changes) => changes,
        Err(e) => fail("Error reading staged changes:", e),
    };

    let client = match OllamaClient::new(&config.endpoint, &config.model) {
        Ok(client) => client,
        Err(e) => fail("Error creating Ollama client:", e),
    };

    let spinner = (!config.message_only && !changes.is_empty())
        .then(|| Spinner::new(&format!("Generating commit message with {}...", config.model)));
    let outcome = run(&client, &changes, config.timeout()).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let generation = match outcome {
        Outcome::NoStagedChanges => {
            diagnostic(
                config.message_only,
                "No staged changes found.".yellow().bold().to_string(),
            );
            return;
        }
        Outcome::BackendUnreachable(e) => {
            diagnostic(
                config.message_only,
                format!("{} {}", "Failed to connect to Ollama service:".red().bold(), e),
            );
            return;
        }
        Outcome::Generated(generation) => generation,
    };

    if args.show_prompt {
        eprintln!("{}", "Prompt:".blue().bold());
        eprintln!("{}\n", generation.prompt);
    }

    if let Some(e) = &generation.generation_error {
        eprintln!(
            "{} {}",
            "Warning: Failed to generate commit message:".yellow(),
            e
        );
    }

    let message = generation.message.to_string();
    if config.message_only {
        // When used with git commit -F, only output the message
        print!("{}", message);
    } else {
        println!("{} {}", "Generated commit message:".green().bold(), message);
    }

    if !should_commit(&config, args.dry_run) {
        if config.commit && !config.message_only {
            println!("{}", "Dry run: commit skipped.".dimmed());
        }
        return;
    }

    let options = CommitOptions {
        no_verify: args.no_verify,
    };
    match create_commit(&repo, &message, &options) {
        Ok(result) => {
            if !config.message_only {
                println!("{} {}", "Created commit".green(), result.oid);
            }
        }
        Err(e) => fail("Error creating commit:", e),
    }
}
