// vitrine_project/demos/storefront_app/src/repl/mod.rs

//! Line-oriented storefront: each command maps onto the same library calls
//! a GUI storefront would make.

mod account;
mod browse;
mod render;

use crate::errors::{AppError, Result};
use crate::state::AppState;

use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use vitrine::inactivity::{IdleEvent, InactivityWatch};
use vitrine::model::parse_category_param;

enum Command {
  Help,
  Browse { category: Option<i64> },
  Search { term: String },
  More,
  List,
  Open { index: usize },
  Save { index: usize },
  Unsave { index: usize },
  Wishlist,
  Ads,
  Categories,
  Login { email: String, password: String },
  Logout,
  Whoami,
  Mine,
  Stats,
  Sell { spec: String },
  Unlist { id: i64 },
  Quit,
}

pub async fn run(state: AppState) -> std::io::Result<()> {
  let (mut watch, mut idle_events) = InactivityWatch::spawn_with(
    Duration::from_secs(state.config.idle_timeout_secs),
    Duration::from_secs(state.config.idle_warning_secs),
  );
  let mut idle_active = true;

  let mut lines = BufReader::new(tokio::io::stdin()).lines();
  println!("Storefront terminal client. Type 'help' for commands.");
  prompt()?;

  loop {
    tokio::select! {
      line = lines.next_line() => {
        let Some(line) = line? else { break }; // EOF closes the session
        watch.record_activity();
        match parse(&line) {
          Ok(None) => {} // Blank line
          Ok(Some(Command::Quit)) => break,
          Ok(Some(Command::Login { email, password })) => {
            match account::login(&state, &email, &password).await {
              Ok(()) => {
                // A fresh session gets a fresh watchdog.
                let (w, rx) = InactivityWatch::spawn_with(
                  Duration::from_secs(state.config.idle_timeout_secs),
                  Duration::from_secs(state.config.idle_warning_secs),
                );
                watch = w;
                idle_events = rx;
                idle_active = true;
              }
              Err(e) => println!("{}", e),
            }
          }
          Ok(Some(command)) => {
            if let Err(e) = dispatch(&state, command).await {
              println!("{}", e);
            }
          }
          Err(e) => println!("{}", e),
        }
        prompt()?;
      }
      event = idle_events.recv(), if idle_active => {
        match event {
          Some(IdleEvent::Warning) => {
            println!();
            println!(
              "Still there? You will be signed out in {}s without activity.",
              state.config.idle_warning_secs
            );
            prompt()?;
          }
          // The user is typing again; a terminal has no banner to take down.
          Some(IdleEvent::WarningCleared) => {}
          Some(IdleEvent::SignedOut) | None => {
            idle_active = false;
            if state.client.auth().is_signed_in() {
              if let Err(e) = state.client.auth().sign_out().await {
                tracing::warn!(error = %e, "Sign-out after inactivity failed.");
              }
              println!();
              println!("Signed out after inactivity.");
              prompt()?;
            }
          }
        }
      }
    }
  }

  println!("Goodbye.");
  Ok(())
}

fn prompt() -> std::io::Result<()> {
  print!("vitrine> ");
  std::io::stdout().flush()
}

fn parse(line: &str) -> Result<Option<Command>> {
  let line = line.trim();
  if line.is_empty() {
    return Ok(None);
  }
  let (verb, rest) = match line.split_once(char::is_whitespace) {
    Some((v, r)) => (v, r.trim()),
    None => (line, ""),
  };

  let command = match verb {
    "help" => Command::Help,
    "browse" => Command::Browse {
      category: parse_category_param(rest),
    },
    "search" => Command::Search { term: rest.to_string() },
    "more" => Command::More,
    "list" => Command::List,
    "open" => Command::Open { index: parse_index(verb, rest)? },
    "save" => Command::Save { index: parse_index(verb, rest)? },
    "unsave" => Command::Unsave { index: parse_index(verb, rest)? },
    "wishlist" => Command::Wishlist,
    "ads" => Command::Ads,
    "categories" => Command::Categories,
    "login" => {
      let mut parts = rest.split_whitespace();
      match (parts.next(), parts.next()) {
        (Some(email), Some(password)) => Command::Login {
          email: email.to_string(),
          password: password.to_string(),
        },
        _ => return Err(AppError::Usage("Usage: login <email> <password>".to_string())),
      }
    }
    "logout" => Command::Logout,
    "whoami" => Command::Whoami,
    "mine" => Command::Mine,
    "stats" => Command::Stats,
    "sell" => Command::Sell { spec: rest.to_string() },
    "unlist" => Command::Unlist {
      id: rest
        .parse()
        .map_err(|_| AppError::Usage("Usage: unlist <listing-id>".to_string()))?,
    },
    "quit" | "exit" => Command::Quit,
    other => {
      return Err(AppError::Usage(format!(
        "Unknown command '{}'. Type 'help' for the list.",
        other
      )))
    }
  };
  Ok(Some(command))
}

fn parse_index(verb: &str, rest: &str) -> Result<usize> {
  rest
    .parse()
    .map_err(|_| AppError::Usage(format!("Usage: {} <number>", verb)))
}

async fn dispatch(state: &AppState, command: Command) -> Result<()> {
  match command {
    Command::Help => {
      print_help();
      Ok(())
    }
    Command::Browse { category } => browse::browse(state, category).await,
    Command::Search { term } => browse::search(state, term).await,
    Command::More => browse::more(state).await,
    Command::List => browse::list(state),
    Command::Open { index } => browse::open(state, index).await,
    Command::Save { index } => browse::save(state, index),
    Command::Unsave { index } => browse::unsave(state, index),
    Command::Wishlist => browse::wishlist(state),
    Command::Ads => browse::ads(state).await,
    Command::Categories => {
      render::categories();
      Ok(())
    }
    Command::Logout => account::logout(state).await,
    Command::Whoami => account::whoami(state),
    Command::Mine => account::mine(state).await,
    Command::Stats => account::stats(state).await,
    Command::Sell { spec } => account::sell(state, &spec).await,
    Command::Unlist { id } => account::unlist(state, id).await,
    // Handled by the loop itself.
    Command::Login { .. } | Command::Quit => Ok(()),
  }
}

fn print_help() {
  println!("Commands:");
  println!("  browse [category-id]      Show the catalog, optionally one category");
  println!("  search <term>             Search names and descriptions ('search' alone clears)");
  println!("  more                      Next page of the current view");
  println!("  list                      Reprint everything loaded so far");
  println!("  open <n>                  Details for the n-th item on screen");
  println!("  save <n> / unsave <n>     Add to / remove from the wishlist");
  println!("  wishlist                  Show saved items");
  println!("  ads                       Current banner campaigns");
  println!("  categories                Category ids and names");
  println!("  login <email> <password>  Sign in");
  println!("  logout / whoami           Session management");
  println!("  mine / stats              Your listings and dashboard numbers");
  println!("  sell <name> | <price> | <category-id> | <condition> | <location> | <seller name> [| <description>]");
  println!("  unlist <listing-id>       Delete one of your listings");
  println!("  quit                      Leave");
  println!();
  println!("Conditions: Brand New, Used - Excellent, Used - Good, Used - Fair, Refurbished");
}
