//! Interactive console front for the quiz core.
//!
//! The front holds no quiz state of its own: every interaction maps to
//! exactly one state-machine call, and everything printed is re-derived
//! from the session on demand. The one-submission-per-question contract
//! holds simply because the loop reads one answer per displayed question.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use log::{info, warn};

use crate::core::bank::seed_bank;
use crate::core::config::ResolvedConfig;
use crate::core::history::HistorySnapshot;
use crate::core::session::{AnswerFeedback, QuizSession};
use crate::generation::QuestionGenerator;
use crate::inference::CompletionProvider;

/// What the user asked for at the end of a loop.
enum Next {
    Continue,
    Quit,
}

/// Runs the whole interactive session until the user quits.
pub async fn run(
    config: ResolvedConfig,
    provider: Arc<dyn CompletionProvider>,
) -> io::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    let generator = QuestionGenerator::new(provider, config.model_name.clone());
    let mut session = QuizSession::new(seed_bank());

    println!("Create your own quiz with the power of AI!");
    println!();

    loop {
        if let Next::Quit = pre_quiz_menu(&mut session, &generator, &mut input).await? {
            break;
        }
        if let Next::Quit = run_quiz(&mut session, &mut input)? {
            break;
        }
        if let Next::Quit = results_menu(&mut session, &mut input)? {
            break;
        }
        // retake: session was restarted, back to the menu
    }

    println!("Goodbye!");
    Ok(())
}

fn read_line(prompt: &str, input: &mut impl BufRead) -> io::Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        // EOF
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Pre-quiz menu: generation and editing are only reachable here, before
/// the first answer of the cycle locks the bank.
async fn pre_quiz_menu(
    session: &mut QuizSession,
    generator: &QuestionGenerator,
    input: &mut impl BufRead,
) -> io::Result<Next> {
    println!("Commands:");
    println!("  add    -> generate a new question with AI");
    println!("  edit   -> delete a question");
    println!("  list   -> show the current questions");
    println!("  start  -> start the quiz ({} questions)", session.total());
    println!("  quit   -> exit");

    loop {
        let line = match read_line("> ", input)? {
            Some(line) => line,
            None => return Ok(Next::Quit),
        };

        match line.as_str() {
            "add" => {
                let topic = match read_line(
                    "Topic preferences (e.g. history, biology, technology): ",
                    input,
                )? {
                    Some(topic) if !topic.is_empty() => topic,
                    Some(_) => {
                        println!("A topic is needed to generate a question.");
                        continue;
                    }
                    None => return Ok(Next::Quit),
                };

                println!("Generating...");
                let bank = session
                    .bank_mut()
                    .expect("menu is only shown before the quiz starts");
                match generator.generate_into(&topic, bank).await {
                    Ok(question) => {
                        println!("Added: {}", question.prompt());
                        println!("The quiz now has {} questions.", session.total());
                    }
                    Err(e) => {
                        // Generation failures never end the session
                        warn!("Generation failed: {e}");
                        println!("An error occurred: {e}");
                        println!("The quiz continues with its existing questions.");
                    }
                }
            }
            "edit" => {
                list_questions(session);
                let line = match read_line("Delete which question number? ", input)? {
                    Some(line) => line,
                    None => return Ok(Next::Quit),
                };
                match line.parse::<usize>() {
                    Ok(n) if n >= 1 => match session.delete_question(n - 1) {
                        Ok(removed) => println!("Deleted: {}", removed.prompt()),
                        Err(e) => println!("Cannot delete: {e}"),
                    },
                    _ => println!("Expected a question number."),
                }
            }
            "list" => list_questions(session),
            "start" => return Ok(Next::Continue),
            "quit" | "exit" => return Ok(Next::Quit),
            "" => {}
            other => println!("Unknown command: {other}"),
        }
    }
}

fn list_questions(session: &QuizSession) {
    for (i, question) in session.bank().questions().iter().enumerate() {
        println!("  {}. {}", i + 1, question.prompt());
    }
}

/// Maps user input to an option: a number picks by position, anything else
/// is submitted as literal answer text.
fn resolve_choice<'a>(line: &'a str, options: &'a [String]) -> &'a str {
    if let Ok(n) = line.parse::<usize>()
        && n >= 1
        && n <= options.len()
    {
        return &options[n - 1];
    }
    line
}

/// One pass through the bank: show, read, submit, repeat until complete.
fn run_quiz(session: &mut QuizSession, input: &mut impl BufRead) -> io::Result<Next> {
    info!("Quiz started with {} questions", session.total());

    while !session.is_complete() {
        let (prompt, options) = {
            let question = session
                .current_question()
                .expect("in-progress session has a current question");
            (question.prompt().to_string(), question.options().to_vec())
        };

        println!();
        println!(
            "[{}/{}  {:.0}% done]",
            session.submitted() + 1,
            session.total(),
            session.progress() * 100.0
        );
        println!("{prompt}");
        for (i, option) in options.iter().enumerate() {
            println!("  {}. {option}", i + 1);
        }

        let line = match read_line("Your answer: ", input)? {
            Some(line) if !line.is_empty() => line,
            Some(_) => continue,
            None => return Ok(Next::Quit),
        };

        let choice = resolve_choice(&line, &options);
        match session
            .submit_answer(choice)
            .expect("loop only submits while in progress")
        {
            AnswerFeedback::Correct { explanation } => {
                println!("Correct!");
                if let Some(text) = explanation {
                    println!("{text}");
                }
            }
            AnswerFeedback::Incorrect => println!("Wrong answer!"),
        }
    }

    Ok(Next::Continue)
}

/// Completed-quiz menu: results, answer reveal, retake.
fn results_menu(session: &mut QuizSession, input: &mut impl BufRead) -> io::Result<Next> {
    let result = session
        .result()
        .expect("results menu is only shown after completion");

    println!();
    println!(
        "Quiz completed! Your score: {}/{}",
        result.score, result.total
    );
    if result.is_perfect() {
        println!("Congrats!");
    } else {
        println!("You failed, try again!");
    }

    println!("Commands: answers, retake, quit");
    loop {
        let line = match read_line("> ", input)? {
            Some(line) => line,
            None => return Ok(Next::Quit),
        };
        match line.as_str() {
            "answers" => show_answers(&session.bank().snapshot()),
            "retake" => {
                session.restart();
                println!();
                return Ok(Next::Continue);
            }
            "quit" | "exit" => return Ok(Next::Quit),
            "" => {}
            other => println!("Unknown command: {other}"),
        }
    }
}

fn show_answers(history: &HistorySnapshot) {
    println!();
    println!("Answers:");
    println!("{history}");
    println!();
}
