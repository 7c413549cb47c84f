use log::error;
use recipe_browser::{browser_from_env, view, Outcome, RecipeBrowser};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};

const HELP: &str = "\
Commands:
  search <words>     search recipes by keyword
  category <label>   Americana | Italiana | Japonesa | Mexicana
  clear              drop the filter and show random recipes
  open <id>          show a recipe
  close              close the recipe view
  list               show the current recipes
  help               show this help
  quit               exit";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let browser = match browser_from_env() {
        Ok(browser) => browser,
        Err(e) => {
            error!("{}", e);
            return Err(e.into());
        }
    };

    report(&browser.initialize().await);
    print!("{}", view::render_grid(&browser.state().await));

    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        let (command, arg) = line.split_once(' ').unwrap_or((line, ""));
        let arg = arg.trim();

        match command {
            "" => continue,
            "quit" | "exit" => break,
            "help" => println!("{}", HELP),
            "list" => print!("{}", view::render_grid(&browser.state().await)),
            "search" => show_list(&browser, browser.search(arg).await).await,
            "category" => show_list(&browser, browser.select_category_label(arg).await).await,
            "clear" => show_list(&browser, browser.clear().await).await,
            "open" => match arg.parse::<u64>() {
                Ok(id) => {
                    let outcome = browser.open_detail(id).await;
                    report(&outcome);
                    if let Some(detail) = browser.state().await.selected_detail {
                        if outcome == Outcome::Updated {
                            print!("{}", view::render_detail(&detail));
                        }
                    }
                }
                Err(_) => println!("Usage: open <id>"),
            },
            "close" => browser.close_detail().await,
            other => println!("Unknown command '{}'. Type 'help'.", other),
        }
    }

    Ok(())
}

async fn show_list(browser: &RecipeBrowser, outcome: Outcome) {
    report(&outcome);
    if outcome == Outcome::Updated {
        print!("{}", view::render_grid(&browser.state().await));
    }
}

fn report(outcome: &Outcome) {
    if let Some(notice) = outcome.notice() {
        println!("{}", notice);
    }
}
