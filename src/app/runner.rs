use crate::app::render::{
    render_detail, render_favourites, render_listing, render_notice, render_session, with_spinner,
};
use crate::app::{load_detail, load_favourites_view, FavouritesView, ListingView, Notice, Session};
use crate::cli::Command;
use crate::services::{AccountApi, CountryApi, SessionStore};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Password;
use std::io::{self, Write};
use std::num::NonZeroUsize;
use std::sync::Arc;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

use super::ApplicationResult;

const BROWSE_HELP: &str = "\
Commands:
  search [TERM]      search by name (no term clears the search)
  region [NAME|all]  filter by region
  language [NAME|all]
                     filter by spoken language
  next | prev        move one page
  page N             jump to page N
  fav CODE           add or remove a favourite
  show CODE          country details
  favs               your favourite countries
  whoami             session status
  help               this text
  quit               leave";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BrowseCommandError {
    #[error("Unknown command: {0} (type 'help' for a list)")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error("Not a page number: {0}")]
    InvalidPage(String),
}

/// One line typed at the browse prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Search(String),
    Region(Option<String>),
    Language(Option<String>),
    Next,
    Prev,
    Page(usize),
    Fav(String),
    Show(String),
    Favourites,
    Whoami,
    Help,
    Quit,
}

fn facet_value(rest: &str) -> Option<String> {
    if rest.is_empty() || rest.eq_ignore_ascii_case("all") {
        None
    } else {
        Some(rest.to_string())
    }
}

impl BrowseCommand {
    /// Parse a prompt line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, BrowseCommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "search" | "s" => BrowseCommand::Search(rest.to_string()),
            "region" | "r" => BrowseCommand::Region(facet_value(rest)),
            "language" | "lang" | "l" => BrowseCommand::Language(facet_value(rest)),
            "next" | "n" => BrowseCommand::Next,
            "prev" | "p" => BrowseCommand::Prev,
            "page" => {
                if rest.is_empty() {
                    return Err(BrowseCommandError::MissingArgument("page"));
                }
                let page = rest
                    .parse::<usize>()
                    .map_err(|_| BrowseCommandError::InvalidPage(rest.to_string()))?;
                BrowseCommand::Page(page)
            }
            "fav" => {
                if rest.is_empty() {
                    return Err(BrowseCommandError::MissingArgument("fav"));
                }
                BrowseCommand::Fav(rest.to_ascii_uppercase())
            }
            "show" => {
                if rest.is_empty() {
                    return Err(BrowseCommandError::MissingArgument("show"));
                }
                BrowseCommand::Show(rest.to_ascii_uppercase())
            }
            "favs" | "favourites" => BrowseCommand::Favourites,
            "whoami" => BrowseCommand::Whoami,
            "help" | "?" => BrowseCommand::Help,
            "quit" | "exit" | "q" => BrowseCommand::Quit,
            _ => return Err(BrowseCommandError::Unknown(word.to_string())),
        };

        Ok(Some(command))
    }
}

/// Where command output goes. The terminal prints as it goes; a captured
/// output keeps both streams so they can be inspected afterwards.
#[derive(Debug)]
pub enum Output {
    Terminal,
    Captured { out: String, err: String },
}

impl Output {
    pub fn captured() -> Self {
        Output::Captured {
            out: String::new(),
            err: String::new(),
        }
    }

    pub fn stdout(&self) -> &str {
        match self {
            Output::Terminal => "",
            Output::Captured { out, .. } => out,
        }
    }

    pub fn stderr(&self) -> &str {
        match self {
            Output::Terminal => "",
            Output::Captured { err, .. } => err,
        }
    }

    fn print(&mut self, text: &str) {
        match self {
            Output::Terminal => print!("{}", text),
            Output::Captured { out, .. } => out.push_str(text),
        }
    }

    fn println(&mut self, text: &str) {
        self.print(text);
        self.print("\n");
    }

    fn eprintln(&mut self, text: &str) {
        match self {
            Output::Terminal => eprintln!("{}", text),
            Output::Captured { err, .. } => {
                err.push_str(text);
                err.push('\n');
            }
        }
    }

    fn notice(&mut self, notice: &Notice) {
        match notice {
            Notice::Success(_) => self.println(&render_notice(notice)),
            Notice::Error(_) => self.eprintln(&render_notice(notice)),
        }
    }

    fn notices(&mut self, notices: Vec<Notice>) {
        for notice in notices {
            self.notice(&notice);
        }
    }

    fn prompt(&mut self) -> io::Result<()> {
        if let Output::Terminal = self {
            print!("> ");
            io::stdout().flush()?;
        }
        Ok(())
    }
}

pub struct AppRunner {
    countries: Arc<dyn CountryApi>,
    account: Arc<dyn AccountApi>,
    session: Arc<Session>,
    store: SessionStore,
    page_size: NonZeroUsize,
}

impl AppRunner {
    pub fn new(
        countries: Arc<dyn CountryApi>,
        account: Arc<dyn AccountApi>,
        session: Arc<Session>,
        store: SessionStore,
        page_size: NonZeroUsize,
    ) -> Self {
        Self {
            countries,
            account,
            session,
            store,
            page_size,
        }
    }

    /// Run one command against the terminal
    pub async fn run(&self, command: Command) -> ApplicationResult<()> {
        let input = BufReader::new(tokio::io::stdin());
        self.execute(command, input, &mut Output::Terminal).await
    }

    /// Check the session, run `command` and persist whatever session it
    /// leaves behind. `input` feeds the browse prompt.
    pub async fn execute<R>(
        &self,
        command: Command,
        input: R,
        out: &mut Output,
    ) -> ApplicationResult<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let state = with_spinner("Checking session...", self.session.bootstrap()).await;
        debug!("Session: {}", render_session(&state));

        let result = match command {
            Command::List {
                search,
                region,
                language,
                page,
            } => {
                self.list(out, search.as_deref(), region.as_deref(), language.as_deref(), page)
                    .await
            }
            Command::Show { code } => self.show(out, &code).await,
            Command::Favourites => self.favourites(out).await,
            Command::Fav { code } => self.fav(out, &code).await,
            Command::Login { email, password } => self.login(out, &email, password).await,
            Command::Logout => self.logout(out).await,
            Command::Whoami => {
                out.println(&render_session(&self.session.state().await));
                Ok(())
            }
            Command::Browse => self.browse(input, out).await,
        };

        self.persist_session().await;
        result
    }

    fn listing_view(&self) -> ListingView {
        ListingView::new(
            Arc::clone(&self.countries),
            Arc::clone(&self.account),
            Arc::clone(&self.session),
            self.page_size,
        )
    }

    /// First load of a fresh view: countries and the favourite markers
    async fn open_listing(&self, view: &mut ListingView) {
        self.reload_listing(view).await;
        view.load_favourites().await;
    }

    /// Refetch countries after a facet change. Favourites stay as loaded.
    async fn reload_listing(&self, view: &mut ListingView) {
        with_spinner("Loading countries...", view.refresh()).await;
    }

    async fn print_listing(&self, out: &mut Output, view: &mut ListingView) {
        let signed_in = self.session.is_authenticated().await;
        out.print(&render_listing(view, signed_in));
        out.notices(view.take_notices());
    }

    async fn list(
        &self,
        out: &mut Output,
        search: Option<&str>,
        region: Option<&str>,
        language: Option<&str>,
        page: usize,
    ) -> ApplicationResult<()> {
        let mut view = self.listing_view();
        if let Some(term) = search {
            view.set_search(term);
        }
        view.set_region(region);
        view.set_language(language);

        self.open_listing(&mut view).await;
        view.go_to_page(page);
        self.print_listing(out, &mut view).await;
        Ok(())
    }

    async fn show(&self, out: &mut Output, code: &str) -> ApplicationResult<()> {
        let view = with_spinner(
            "Loading country...",
            load_detail(self.countries.as_ref(), code),
        )
        .await;
        out.print(&render_detail(&view));
        Ok(())
    }

    async fn favourites(&self, out: &mut Output) -> ApplicationResult<()> {
        let view = with_spinner(
            "Loading favourites...",
            load_favourites_view(self.countries.as_ref(), self.account.as_ref(), &self.session),
        )
        .await;
        out.print(&render_favourites(&view));
        if let FavouritesView::Loaded {
            notice: Some(notice),
            ..
        } = &view
        {
            out.notice(notice);
        }
        Ok(())
    }

    async fn fav(&self, out: &mut Output, code: &str) -> ApplicationResult<()> {
        let code = code.trim().to_ascii_uppercase();
        let mut view = self.listing_view();
        view.load_favourites().await;
        out.notices(view.take_notices());

        let outcome = view.toggle_favourite(&code).await?;
        out.notice(&Notice::success(outcome.message()));
        Ok(())
    }

    async fn login(
        &self,
        out: &mut Output,
        email: &str,
        password: Option<String>,
    ) -> ApplicationResult<()> {
        let password = match password {
            Some(password) => password,
            None => prompt_password()?,
        };

        let user = with_spinner("Signing in...", self.session.login(email, &password)).await?;
        out.notice(&Notice::success(format!("Signed in as {}", user.display_name())));

        // Signing in lands on the listing
        let mut view = self.listing_view();
        self.open_listing(&mut view).await;
        out.println("");
        self.print_listing(out, &mut view).await;
        Ok(())
    }

    async fn logout(&self, out: &mut Output) -> ApplicationResult<()> {
        self.session.logout().await;
        out.notice(&Notice::success("Signed out"));
        Ok(())
    }

    /// Write the current cookie to the session file. The file is removed only
    /// once the session is known to be over; an unreachable account service
    /// leaves it for the next run. Failures only cost persistence.
    async fn persist_session(&self) {
        let cookie = if self.session.is_authenticated().await {
            self.account.session_cookie()
        } else if self.session.has_ended() {
            None
        } else {
            debug!("Session unconfirmed, keeping {:?}", self.store.path());
            return;
        };

        if let Err(e) = self.store.sync(cookie.as_deref()).await {
            warn!("Failed to update session file {:?}: {}", self.store.path(), e);
        }
    }

    async fn browse<R>(&self, input: R, out: &mut Output) -> ApplicationResult<()>
    where
        R: AsyncBufRead + Unpin,
    {
        info!("Starting interactive browser");
        let mut view = self.listing_view();
        self.open_listing(&mut view).await;
        self.print_listing(out, &mut view).await;

        let mut lines = input.lines();
        loop {
            out.prompt()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };

            let command = match BrowseCommand::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    out.notice(&Notice::error(e.to_string()));
                    continue;
                }
            };

            if command == BrowseCommand::Quit {
                break;
            }
            self.apply(out, &mut view, command).await;
        }

        info!("Leaving interactive browser");
        Ok(())
    }

    async fn apply(&self, out: &mut Output, view: &mut ListingView, command: BrowseCommand) {
        match command {
            BrowseCommand::Search(term) => {
                if view.set_search(&term) {
                    self.reload_listing(view).await;
                }
                self.print_listing(out, view).await;
            }
            BrowseCommand::Region(region) => {
                if view.set_region(region.as_deref()) {
                    self.reload_listing(view).await;
                }
                self.print_listing(out, view).await;
            }
            BrowseCommand::Language(language) => {
                if view.set_language(language.as_deref()) {
                    self.reload_listing(view).await;
                }
                self.print_listing(out, view).await;
            }
            BrowseCommand::Next => {
                if view.next_page() {
                    self.print_listing(out, view).await;
                } else {
                    out.notice(&Notice::error("Already on the last page"));
                }
            }
            BrowseCommand::Prev => {
                if view.prev_page() {
                    self.print_listing(out, view).await;
                } else {
                    out.notice(&Notice::error("Already on the first page"));
                }
            }
            BrowseCommand::Page(page) => {
                view.go_to_page(page);
                self.print_listing(out, view).await;
            }
            BrowseCommand::Fav(code) => {
                if let Err(e) = view.toggle_favourite(&code).await {
                    debug!("Toggle for {} not applied: {}", code, e);
                }
                out.notices(view.take_notices());
            }
            BrowseCommand::Show(code) => {
                if let Err(e) = self.show(out, &code).await {
                    warn!("{}", e);
                }
            }
            BrowseCommand::Favourites => {
                if let Err(e) = self.favourites(out).await {
                    warn!("{}", e);
                }
            }
            BrowseCommand::Whoami => {
                out.println(&render_session(&self.session.state().await));
            }
            BrowseCommand::Help => out.println(BROWSE_HELP),
            BrowseCommand::Quit => {}
        }
    }
}

fn prompt_password() -> io::Result<String> {
    Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Password")
        .interact()
        .map_err(io::Error::other)
}
