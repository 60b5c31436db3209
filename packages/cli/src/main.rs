//! Interactive console for the classroom platform.
//!
//! One binary serves both roles: a login shell at the top, then a
//! teacher or student console picked by the session role gate. Domain
//! strings come from the embedded locale tables so the whole interface
//! follows the `locale` preference; shell scaffolding (command menus,
//! prompts) stays plain.

mod console;
mod student;
mod teacher;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use platform::config::AppConfig;
use platform::entity::{Problem, Role};
use platform::i18n::{self, Locale, Translations};
use platform::session::{self, Access};
use platform::storage::{FileStore, MaterialVault};
use platform::{Store, StoreError, seed};
use runner::PythonRunner;
use tracing::info;
use tutor::{GeminiTutor, Language, Tutor};

#[derive(Parser, Debug)]
#[command(version, about = "Classroom console for the Python study platform")]
struct Args {
    /// Configuration file base path (default: $PYSTUDY_CONFIG or "config/pystudy")
    #[arg(long)]
    config: Option<String>,

    /// Directory for preferences and uploaded materials
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Interface language for this run (en or ko)
    #[arg(long)]
    locale: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    match run(Args::parse()).await {
        Err(e) if is_end_of_input(&e) => Ok(()),
        result => result,
    }
}

/// End of piped input unwinds every prompt as an error; treat it as a
/// normal exit rather than a failure.
fn is_end_of_input(e: &anyhow::Error) -> bool {
    e.downcast_ref::<io::Error>()
        .is_some_and(|io| io.kind() == io::ErrorKind::UnexpectedEof)
}

async fn run(args: Args) -> anyhow::Result<()> {
    let mut config = match args.config.as_deref() {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    }
    .context("Failed to load config")?;
    if let Some(dir) = args.data_dir {
        config.storage.data_dir = dir.to_string_lossy().into_owned();
    }

    let data_dir = PathBuf::from(&config.storage.data_dir);
    let prefs = Arc::new(
        FileStore::open(data_dir.join("session.json"))
            .context("Failed to open preference storage")?,
    );
    let vault = MaterialVault::new(data_dir.join("materials"))
        .context("Failed to open the material vault")?;

    let mut store = Store::new(prefs.clone(), vault).context("Failed to restore the session")?;
    seed::apply(&mut store);

    let translations = Translations::load().context("Failed to parse the locale tables")?;
    let locale = match args.locale.as_deref() {
        Some(tag) => Locale::from_tag(tag)
            .with_context(|| format!("Unknown locale: {tag} (expected en or ko)"))?,
        None => i18n::saved_locale(prefs.as_ref()).context("Failed to read the saved locale")?,
    };
    info!(locale = %locale, data_dir = %data_dir.display(), "console starting");

    let mut app = App {
        store,
        translations,
        locale,
        prefs,
        runner: PythonRunner::new(&config.runner.python_bin),
        tutor: GeminiTutor::new(
            &config.tutor.api_base,
            &config.tutor.api_key,
            &config.tutor.model,
        ),
    };
    app.shell().await
}

/// Everything the consoles need: the domain store, the locale tables,
/// the preference file and the two external collaborators.
pub(crate) struct App {
    pub store: Store,
    pub translations: Translations,
    pub locale: Locale,
    pub prefs: Arc<FileStore>,
    pub runner: PythonRunner,
    pub tutor: GeminiTutor,
}

impl App {
    /// Translated text for `key` in the active locale.
    pub fn text(&self, key: &str) -> String {
        self.translations.translate(self.locale, key)
    }

    /// Prompt language for the AI tutor, following the interface locale.
    pub fn language(&self) -> Language {
        match self.locale {
            Locale::En => Language::En,
            Locale::Ko => Language::Ko,
        }
    }

    /// Look a problem up by its 1-based list position or by id.
    pub fn find_problem(&self, selector: &str) -> Option<Problem> {
        if let Ok(n) = selector.parse::<usize>() {
            return self.store.problems().get(n.checked_sub(1)?).cloned();
        }
        self.store.problem(selector).cloned()
    }

    /// Switch the interface language and persist the choice.
    pub fn switch_locale(&mut self, tag: &str) -> anyhow::Result<()> {
        match Locale::from_tag(tag) {
            Some(locale) => {
                self.locale = locale;
                i18n::save_locale(self.prefs.as_ref(), locale)
                    .context("Failed to save the locale preference")?;
                println!("[{}]", locale.as_str());
            }
            None => println!("Unknown locale: {tag} (expected en or ko)"),
        }
        Ok(())
    }

    /// AI feedback for `code`, or the no-code notice.
    pub async fn show_feedback(&self, code: &str) {
        if code.trim().is_empty() {
            println!("{}", self.text("codeFeedback.noCode"));
            return;
        }
        println!("{}", self.text("codeFeedback.analyzing"));
        let text = self.tutor.feedback(code, self.language()).await;
        println!("\n{text}");
    }

    /// AI line-by-line explanation for `code`, or the no-code notice.
    pub async fn show_explanation(&self, code: &str) {
        if code.trim().is_empty() {
            println!("{}", self.text("codeExplanation.noCode"));
            return;
        }
        println!("{}", self.text("codeExplanation.generating"));
        let text = self.tutor.explanation(code, self.language()).await;
        println!("\n{text}");
    }

    /// Top-level shell: login, locale, exit. A restored session goes
    /// straight to the role console.
    async fn shell(&mut self) -> anyhow::Result<()> {
        println!("{}", self.text("header.title"));
        println!("{}", self.text("login.subtitle"));

        loop {
            if self.store.current_user().is_some() {
                self.home().await?;
                continue;
            }

            println!();
            println!("Commands: login, locale <en|ko>, exit");
            let input = console::prompt(">")?;
            let (command, rest) = console::split_command(&input);
            match command {
                "login" => self.login()?,
                "locale" => self.switch_locale(rest)?,
                "exit" => return Ok(()),
                "" => {}
                other => println!("Unknown command: {other}"),
            }
        }
    }

    fn login(&mut self) -> anyhow::Result<()> {
        let username = console::prompt(&self.text("login.usernamePlaceholder"))?;
        let password = console::prompt(&self.text("login.passwordPlaceholder"))?;
        if username.is_empty() || password.is_empty() {
            println!("{}", self.text("login.errorBothFields"));
            return Ok(());
        }
        match self.store.login(&username, &password) {
            Ok(user) => println!("{} {}", self.text("header.welcome"), user.name),
            Err(StoreError::InvalidCredentials) => println!("{}", self.text("login.errorInvalid")),
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }

    /// Route the logged-in user: the teacher console is gated on the
    /// teacher role, anyone else lands on their own home view.
    async fn home(&mut self) -> anyhow::Result<()> {
        match session::authorize(self.store.current_user(), &[Role::Teacher]) {
            Access::Granted => teacher::console(self).await,
            Access::RedirectHome(_) => student::console(self).await,
            Access::RedirectLogin => Ok(()),
        }
    }
}
