//! CLI entry point for `sqldrill`.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use sqldrill::bank::QuestionBank;
use sqldrill::checker::validate::validate_any;
use sqldrill::output::formatter;
use sqldrill::parser::normalize::normalize;
use sqldrill::parser::statement::ParsedStatement;

#[derive(Parser)]
#[command(
    name = "sqldrill",
    about = "Check a learner-submitted SQL statement against reference answers"
)]
struct Cli {
    /// File containing the submitted SQL statement
    #[arg(required_unless_present = "query")]
    input: Option<PathBuf>,

    /// Submitted SQL statement passed inline
    #[arg(long, conflicts_with = "input")]
    query: Option<String>,

    /// Reference answer passed inline (repeatable; first match wins)
    #[arg(long = "answer")]
    answers: Vec<String>,

    /// File containing one reference answer (repeatable)
    #[arg(long = "answer-file")]
    answer_files: Vec<PathBuf>,

    /// Question bank JSON file
    #[arg(long, requires = "question")]
    bank: Option<PathBuf>,

    /// Question id to look up in the bank
    #[arg(long, requires = "bank")]
    question: Option<String>,

    /// Emit the verdict as JSON instead of plain text
    #[arg(long)]
    json: bool,

    /// Print the parsed clause breakdown of both sides to stderr
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let submitted = match read_submitted(&cli) {
        Ok(sql) => sql,
        Err(e) => {
            eprintln!("{e}");
            process::exit(2);
        }
    };

    let references = match collect_references(&cli) {
        Ok(refs) => refs,
        Err(e) => {
            eprintln!("{e}");
            process::exit(2);
        }
    };

    if cli.verbose {
        let parsed = ParsedStatement::extract(&normalize(&submitted));
        eprint!("{}", formatter::render_breakdown("submitted", &parsed));
        for (index, reference) in references.iter().enumerate() {
            let parsed = ParsedStatement::extract(&normalize(reference));
            eprint!(
                "{}",
                formatter::render_breakdown(&format!("reference[{index}]"), &parsed)
            );
        }
    }

    let verdict = validate_any(&submitted, &references);

    if cli.json {
        match formatter::render_json(&verdict) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("{e}");
                process::exit(2);
            }
        }
    } else {
        println!("{}", formatter::render_text(&verdict));
    }

    if !verdict.is_valid {
        process::exit(1);
    }
}

fn read_submitted(cli: &Cli) -> Result<String, String> {
    if let Some(query) = &cli.query {
        return Ok(query.clone());
    }
    let Some(path) = &cli.input else {
        return Err("No submitted SQL provided".to_string());
    };
    std::fs::read_to_string(path).map_err(|e| format!("Error reading {}: {e}", path.display()))
}

fn collect_references(cli: &Cli) -> Result<Vec<String>, String> {
    let mut references = cli.answers.clone();
    for path in &cli.answer_files {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Error reading {}: {e}", path.display()))?;
        references.push(content);
    }

    if let (Some(bank_path), Some(question_id)) = (&cli.bank, &cli.question) {
        let json = std::fs::read_to_string(bank_path)
            .map_err(|e| format!("Error reading {}: {e}", bank_path.display()))?;
        let bank = QuestionBank::load_from_json(&json)?;
        let question = bank
            .question(question_id)
            .ok_or_else(|| format!("Unknown question id '{question_id}'"))?;
        references.extend(question.answers.iter().cloned());
    }

    if references.is_empty() {
        return Err(
            "No reference answers provided; use --answer, --answer-file, or --bank/--question"
                .to_string(),
        );
    }
    Ok(references)
}
