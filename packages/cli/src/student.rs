//! Student console: the problem list and the coding workspace.

use std::time::Instant;

use platform::Store;
use platform::entity::{Problem, TypingPoint, User};
use platform::models::NewSubmission;
use runner::{CodeRunner, RunnerError};
use tracing::warn;

use crate::App;
use crate::console;

pub async fn console(app: &mut App) -> anyhow::Result<()> {
    let Some(user) = app.store.current_user().cloned() else {
        return Ok(());
    };

    println!("\n{}", app.text("studentDashboard.title"));
    match user.class_id.as_deref().and_then(|id| app.store.classroom(id)) {
        Some(classroom) => println!(
            "{} {} {} {}",
            app.text("studentDashboard.welcome"),
            user.name,
            app.text("studentDashboard.from"),
            classroom.name,
        ),
        None => println!("{} {}", app.text("studentDashboard.welcome"), user.name),
    }

    loop {
        println!();
        println!("Commands: problems, solve <problem>, locale <en|ko>, logout");
        let input = console::prompt("student>")?;
        let (command, rest) = console::split_command(&input);
        match command {
            "problems" => list_problems(app, &user),
            "solve" => solve(app, &user, rest).await?,
            "locale" => app.switch_locale(rest)?,
            "logout" => {
                app.store.logout()?;
                return Ok(());
            }
            "" => {}
            other => println!("Unknown command: {other}"),
        }
    }
}

/// Problem catalog with a `*` marker on problems this student has
/// already submitted.
fn list_problems(app: &App, user: &User) {
    for (index, problem) in app.store.problems().iter().enumerate() {
        let marker = match app.store.latest_submission(&problem.id, &user.id) {
            Some(_) => "*",
            None => " ",
        };
        println!(
            "{:>3}.{marker} {}",
            index + 1,
            problem.display_title(&app.translations, app.locale),
        );
    }
}

/// The coding workspace: a line editor over the prefilled code, with
/// commands for running, AI review and final submission.
async fn solve(app: &mut App, user: &User, selector: &str) -> anyhow::Result<()> {
    let Some(problem) = app.find_problem(selector) else {
        println!("{}", app.text("codingPage.problemNotFound"));
        return Ok(());
    };

    println!("\n{}", problem.display_title(&app.translations, app.locale));
    println!("\n{}:", app.text("codingPage.problemDescription"));
    println!(
        "{}",
        problem.display_description(&app.translations, app.locale),
    );

    let mut editor = Editor::open(&app.store, &problem, user);
    println!("\n{}:", app.text("codingPage.yourCode"));
    if editor.is_empty() {
        println!("{}", app.text("codingPage.noInitialCode"));
    } else {
        editor.print();
    }
    println!();
    println!(
        "Type code to append. Commands: :show, :set <line> <code>, :del, :hint, :run, \
         :feedback, :explain, :submit, :back"
    );

    // AI review always targets the code as last run, never live edits
    let mut last_run: Option<String> = None;
    loop {
        let line = console::read_code_line()?;
        if !line.trim_start().starts_with(':') {
            editor.append(line);
            continue;
        }
        let command = line.trim().to_string();
        match command.as_str() {
            ":back" => return Ok(()),
            ":show" => editor.print(),
            ":del" => editor.delete_last(),
            ":hint" => match problem.display_hint(&app.translations, app.locale) {
                Some(hint) => println!("{hint}"),
                None => println!("-"),
            },
            ":run" => {
                let source = editor.source();
                run_code(app, &source).await;
                last_run = Some(source);
            }
            ":feedback" => match &last_run {
                Some(code) => app.show_feedback(code).await,
                None => println!("{}", app.text("codingPage.getAIFeedback")),
            },
            ":explain" => match &last_run {
                Some(code) => app.show_explanation(code).await,
                None => println!("{}", app.text("codingPage.getAIExplanation")),
            },
            ":submit" => {
                submit(app, user, &problem.id, editor);
                return Ok(());
            }
            ":set" => println!("Usage: :set <line> <code>"),
            other => match other.strip_prefix(":set ") {
                Some(args) => editor.replace(args),
                None => println!("Unknown command: {other}"),
            },
        }
    }
}

async fn run_code(app: &App, source: &str) {
    println!("{}", app.text("codingPage.runMessage"));
    match app.runner.run(source).await {
        Ok(output) => {
            println!("{}:", app.text("codingPage.output"));
            match output.rendered() {
                Some(text) => println!("{text}"),
                None => println!("{}", app.text("codingPage.successMessage")),
            }
        }
        Err(RunnerError::Execution { stderr, traceback }) => {
            println!("{}:", app.text("codingPage.output"));
            println!("{}\n{stderr}{traceback}", app.text("codingPage.executionError"));
        }
        Err(e) => {
            warn!(error = %e, "python runner unavailable");
            println!("{}", app.text("codingPage.environmentError"));
        }
    }
}

fn submit(app: &mut App, user: &User, problem_id: &str, editor: Editor) {
    // submissions need an enrolled class
    let Some(class_id) = user.class_id.clone() else {
        return;
    };
    app.store.add_submission(NewSubmission {
        problem_id: problem_id.to_string(),
        student_id: user.id.clone(),
        class_id,
        final_code: editor.source(),
        typing_history: editor.history,
    });
    println!("{}", app.text("codingPage.submissionSuccess"));
}

/// Plain line editor that records a typing trace as it changes.
struct Editor {
    lines: Vec<String>,
    history: Vec<TypingPoint>,
    started: Option<Instant>,
}

impl Editor {
    /// Open with the student's latest submission, else the starter code.
    fn open(store: &Store, problem: &Problem, user: &User) -> Editor {
        let prefill = match store.latest_submission(&problem.id, &user.id) {
            Some(previous) => previous.final_code.clone(),
            None => problem.initial_code.clone(),
        };
        Editor {
            lines: if prefill.is_empty() {
                Vec::new()
            } else {
                prefill.lines().map(str::to_string).collect()
            },
            history: Vec::new(),
            started: None,
        }
    }

    fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn source(&self) -> String {
        self.lines.join("\n")
    }

    fn append(&mut self, line: String) {
        self.lines.push(line);
        self.record();
    }

    fn replace(&mut self, args: &str) {
        let Some((number, text)) = args.split_once(' ') else {
            println!("Usage: :set <line> <code>");
            return;
        };
        match number.parse::<usize>().ok().and_then(|n| n.checked_sub(1)) {
            Some(index) if index < self.lines.len() => {
                self.lines[index] = text.to_string();
                self.record();
                self.print();
            }
            _ => println!("No line {number}"),
        }
    }

    fn delete_last(&mut self) {
        if self.lines.pop().is_some() {
            self.record();
        }
        self.print();
    }

    fn print(&self) {
        if self.lines.is_empty() {
            println!("  (empty)");
            return;
        }
        for (number, line) in self.lines.iter().enumerate() {
            println!("{:>3} | {line}", number + 1);
        }
    }

    /// Sample the trace after an edit. The clock starts at the first
    /// edit.
    fn record(&mut self) {
        let started = self.started.get_or_insert_with(Instant::now);
        self.history.push(TypingPoint {
            timestamp_ms: started.elapsed().as_millis() as u64,
            code_length: self.source().len(),
        });
    }
}
