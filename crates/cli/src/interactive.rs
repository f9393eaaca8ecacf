//! Line-driven version of the search-and-publish form.
//!
//! A plain line replaces the query (so typing several lines quickly exercises
//! the debounce). Lines starting with `:` are commands.

use tokio::io::{AsyncBufReadExt, BufReader};

use nearme_core::types::preview_url;
use nearme_core::{Browse, Controller, FormState, NearMeApi, NearMeConfig, NoticeLevel};

const HELP: &str = "\
Type text to search. Commands:
  :pick N        select suggestion N
  :up N          select ancestor N of the shown species
  :plural TEXT   set the plural label
  :host TEXT     set the hostname (empty restores the suggestion)
  :publish       publish the shown species
  :show          redraw the form
  :quit          exit";

enum Command {
    Query(String),
    Pick(usize),
    Up(usize),
    Plural(String),
    Host(String),
    Publish,
    Show,
    Help,
    Quit,
    Unknown(String),
}

fn parse_line(line: &str) -> Command {
    let Some(rest) = line.strip_prefix(':') else {
        return Command::Query(line.to_string());
    };
    let (name, arg) = match rest.split_once(' ') {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest.trim(), ""),
    };
    match name {
        "pick" => arg.parse().map(Command::Pick).unwrap_or(Command::Unknown(line.to_string())),
        "up" => arg.parse().map(Command::Up).unwrap_or(Command::Unknown(line.to_string())),
        "plural" => Command::Plural(arg.to_string()),
        "host" => Command::Host(arg.to_string()),
        "publish" => Command::Publish,
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "q" => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}

/// Run the form until `:quit` or end of input, then drain outstanding work.
pub async fn run<A: NearMeApi>(
    mut controller: Controller<A>,
    config: &NearMeConfig,
) -> std::io::Result<()> {
    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if !handle(&mut controller, parse_line(&line), config) {
                    break;
                }
            }
            Some(event) = controller.next_event(), if !controller.is_idle() => {
                controller.dispatch(event);
                render(controller.state(), config);
            }
        }
        print_notices(&mut controller);
    }

    if !controller.is_idle() {
        controller.run_until_idle().await;
        render(controller.state(), config);
    }
    print_notices(&mut controller);
    Ok(())
}

fn handle<A: NearMeApi>(controller: &mut Controller<A>, command: Command, config: &NearMeConfig) -> bool {
    match command {
        Command::Query(q) => controller.type_query(q),
        Command::Pick(n) => {
            let picked = pick(controller.state().suggestions().iter().map(|t| t.id), n);
            match picked {
                Some(id) => controller.select(id),
                None => eprintln!("No suggestion {n}"),
            }
        }
        Command::Up(n) => {
            let picked = controller
                .state()
                .taxon()
                .and_then(|t| pick(t.ancestors.iter().map(|a| a.id), n));
            match picked {
                Some(id) => controller.select(id),
                None => eprintln!("No ancestor {n}"),
            }
        }
        Command::Plural(p) => {
            controller.edit_plural(p);
            render(controller.state(), config);
        }
        Command::Host(h) => {
            controller.edit_hostname(h);
            render(controller.state(), config);
        }
        Command::Publish => controller.submit(),
        Command::Show => render(controller.state(), config),
        Command::Help => println!("{HELP}"),
        Command::Quit => return false,
        Command::Unknown(line) => eprintln!("Unknown command: {line} (:help for commands)"),
    }
    true
}

/// 1-based lookup.
fn pick(ids: impl Iterator<Item = u64>, n: usize) -> Option<u64> {
    ids.enumerate().find(|(i, _)| i + 1 == n).map(|(_, id)| id)
}

fn print_notices<A: NearMeApi>(controller: &mut Controller<A>) {
    for notice in controller.take_notices() {
        match notice.level {
            NoticeLevel::Error => eprintln!("! {}", notice.text),
            NoticeLevel::Info => println!("{}", notice.text),
        }
    }
}

fn render(state: &FormState, config: &NearMeConfig) {
    println!();
    if state.searching || state.fetching_detail {
        println!("...");
    }
    match &state.browse {
        Browse::Empty => {}
        Browse::Suggestions(list) => {
            for (i, t) in list.iter().enumerate() {
                println!("{:>3}. {} - {}", i + 1, t.display_name(), t.name);
            }
        }
        Browse::Detail(taxon) => {
            println!("{}  {}", taxon.display_name(), preview_url(&config.preview_base, taxon.id));
            for (i, a) in taxon.ancestors.iter().enumerate() {
                println!("   ^{}. {}", i + 1, a.display_name());
            }
            let suggested = if state.hostname.is_none() { " (suggested)" } else { "" };
            println!("Plural:    {}", state.plural);
            println!(
                "Hostname:  {}{suggested}",
                state.effective_hostname().unwrap_or_default()
            );
            if state.publishing {
                println!("Publishing...");
            }
        }
    }
    if let Some(deployment) = &state.deployment {
        println!("Deployed:  {}", deployment.url);
        if let Some(message) = &deployment.message {
            println!("           {message}");
        }
    }
}
