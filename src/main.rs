use std::io;
use std::io::BufRead;
use std::io::Write;

use anyhow::Context;
use crossterm::cursor;
use crossterm::execute;
use crossterm::terminal::Clear;
use crossterm::terminal::ClearType;
use tracing_subscriber::EnvFilter;

use lifegrid::grid::DEFAULT_DIM;
use lifegrid::grid::Grid;

const TITLE: &str = "Conway's Game of Life";

/// Live cells placed by the Random menu entry
const RANDOM_CELLS: usize = 50;

/// Generations run by the Go menu entry
const GO_STEPS: u64 = 9;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("{TITLE}");
    println!("{}", "-".repeat(TITLE.len()));

    let mut grid = Grid::new(DEFAULT_DIM);
    print!("{}", grid.render());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("\n--- Game of Life Menu ---");
        println!("C - Clear\nR - Random ({RANDOM_CELLS} cells)\nS - Step\nG - Go\nV - Save\nL - Load\nQ - Quit");
        print!("Enter choice: ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let choice = line?.trim().to_uppercase();

        match choice.as_str() {
            "C" => grid.clear(),
            "R" => {
                if let Err(e) = grid.populate_random(RANDOM_CELLS) {
                    println!("{e}");
                }
            }
            "S" => grid.step(),
            "G" => {
                let mut stdout = io::stdout();

                for _ in 0..GO_STEPS {
                    grid.step();

                    execute!(stdout, Clear(ClearType::All), cursor::MoveTo(0, 0))?;
                    print!("{}", grid.render());
                }
            }
            "V" => {
                let path = prompt(&mut lines, "Enter filename to save: ")?;

                if let Err(e) = grid.save(&path) {
                    println!("{e}");
                }
            }
            "L" => {
                let path = prompt(&mut lines, "Enter filename to load: ")?;

                if let Err(e) = grid.load(&path) {
                    println!("{e}");
                }
            }
            "Q" => {
                println!("Exiting...");
                break;
            }
            _ => println!("Invalid choice."),
        }

        print!("{}", grid.render());
    }

    Ok(())
}

fn prompt<B: BufRead>(lines: &mut io::Lines<B>, msg: &str) -> anyhow::Result<String> {
    print!("{msg}");
    io::stdout().flush()?;

    let line = lines
        .next()
        .context("Unexpected end of input")?
        .context("Failed to read filename")?;

    Ok(line.trim().to_string())
}
