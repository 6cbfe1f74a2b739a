use clap::{Parser, Subcommand};

use rottenlang::driver;
use rottenlang::ir::printer::AstPrinter;
use rottenlang::parser::{ParserOptions, lexer};
use rottenlang::report::StderrReporter;

#[derive(Parser)]
#[command(name = "rottenlang")]
#[command(about = "Lexer and expression parser for the rottenlang scripting language", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the token stream of a source file
    Tokens {
        /// Source file
        input: String,
    },

    /// Parse every line of a source file as an expression and print the tree
    Parse {
        /// Source file
        input: String,

        /// Treat tokens that start no expression as implicit literals
        #[arg(long)]
        lenient: bool,

        /// Print the token stream before parsing
        #[arg(long)]
        show_tokens: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Tokens { input } => {
            let source = driver::read_source(&input)?;
            let scanned = lexer::scan(&source);
            print_tokens(&scanned.tokens);
            scanned.report(&mut StderrReporter);
            scanned.into_result()?;
        }
        Commands::Parse { input, lenient, show_tokens } => {
            println!("Parsing {}...", input);

            let source = driver::read_source(&input)?;
            let scanned = lexer::scan(&source);
            if show_tokens {
                println!("=== TOKENS ===");
                print_tokens(&scanned.tokens);
            }

            println!("=== AST ===");
            let options = ParserOptions { lenient };
            let outcomes = driver::run_scanned(scanned, &mut StderrReporter, options)?;
            let mut printer = AstPrinter::new();
            for outcome in outcomes {
                match outcome.result {
                    Ok(expression) => println!("line {}: {}", outcome.line, printer.print(&expression)),
                    Err(e) => eprintln!("line {}: {}", outcome.line, e),
                }
            }
        }
    }

    Ok(())
}

fn print_tokens(tokens: &[rottenlang::token::Token]) {
    for token in tokens {
        let literal = match &token.literal {
            Some(value) => value.to_string(),
            None => "-".to_string(),
        };
        println!(
            "{:>4}:{:<4} {:<16} {:<12} {}",
            token.line(),
            token.column(),
            token.kind.name(),
            format!("'{}'", token.lexeme),
            literal
        );
    }
}
