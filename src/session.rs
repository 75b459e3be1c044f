//! Interactive prompt loop
//!
//! Asks for a state, lists its national sites, and shows places near the site
//! the user picks by number. Input and output are generic so the whole loop
//! can be driven from tests.

use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::debug;

use crate::data::{PlacesClient, ScrapeError, Site, SiteDirectory, StateIndex};
use crate::fetch::{Dispatcher, HttpTransport, Transport};

const STATE_PROMPT: &str = "Enter a State name (e.g., Michigan, michigan) or \"exit\": ";
const SITE_PROMPT: &str = "Choose the number for detail search or enter \"exit\" or \"back\": ";

/// Errors that end a session
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading input or writing output failed
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    /// A failure the session cannot recover from
    #[error(transparent)]
    Fatal(ScrapeError),
}

/// What the site prompt decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    /// Return to the state prompt
    Back,
    /// End the session
    Exit,
}

/// One interactive run of the explorer
pub struct Session<R, W, T = HttpTransport> {
    input: R,
    output: W,
    dispatcher: Dispatcher<T>,
    directory: SiteDirectory,
    places: PlacesClient,
    index: StateIndex,
}

impl<R: BufRead, W: Write, T: Transport> Session<R, W, T> {
    pub fn new(
        input: R,
        output: W,
        dispatcher: Dispatcher<T>,
        directory: SiteDirectory,
        places: PlacesClient,
        index: StateIndex,
    ) -> Self {
        Self {
            input,
            output,
            dispatcher,
            directory,
            places,
            index,
        }
    }

    /// Runs until the user types `exit` or input ends
    ///
    /// Unknown states and bad selections are reported and re-prompted.
    /// Request and parsing failures are reported and the loop continues,
    /// unless they are fatal (see [`ScrapeError::is_fatal`]).
    pub async fn run(&mut self) -> Result<(), SessionError> {
        loop {
            let Some(state) = self.prompt(STATE_PROMPT)? else {
                return Ok(());
            };
            if state.eq_ignore_ascii_case("exit") {
                return Ok(());
            }

            let Some(sites) = self.list_sites(&state).await? else {
                continue;
            };

            if self.choose_site(&sites).await? == Flow::Exit {
                return Ok(());
            }
        }
    }

    /// Consumes the session, returning its output sink
    pub fn into_output(self) -> W {
        self.output
    }

    /// The dispatcher used for every request
    pub fn dispatcher(&self) -> &Dispatcher<T> {
        &self.dispatcher
    }

    /// Prints `text` and reads one trimmed line; `None` at end of input
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Prints the numbered site list for a state
    ///
    /// Returns `None` when the state is unknown or its sites could not be loaded.
    async fn list_sites(&mut self, state: &str) -> Result<Option<Vec<Site>>, SessionError> {
        let Some(state_url) = self.index.lookup(state).map(str::to_string) else {
            writeln!(self.output, "[Error] Enter proper state name")?;
            return Ok(None);
        };

        let sites = match self
            .directory
            .sites_for_state(&mut self.dispatcher, &state_url)
            .await
        {
            Ok(sites) => sites,
            Err(e) => {
                self.report(e)?;
                return Ok(None);
            }
        };

        writeln!(self.output, "-------------------")?;
        writeln!(self.output, "List of national sites in {state}")?;
        writeln!(self.output, "-------------------")?;
        for (i, site) in sites.iter().enumerate() {
            writeln!(self.output, "[{}] {}", i + 1, site.info())?;
        }

        Ok(Some(sites))
    }

    /// Prompts for site numbers until the user goes back or exits
    async fn choose_site(&mut self, sites: &[Site]) -> Result<Flow, SessionError> {
        loop {
            let Some(choice) = self.prompt(SITE_PROMPT)? else {
                return Ok(Flow::Exit);
            };

            if choice.eq_ignore_ascii_case("exit") {
                return Ok(Flow::Exit);
            }
            if choice.eq_ignore_ascii_case("back") {
                return Ok(Flow::Back);
            }

            match choice.parse::<usize>() {
                Ok(n) if (1..=sites.len()).contains(&n) => self.show_nearby(&sites[n - 1]).await?,
                _ => writeln!(self.output, "[Error] Invalid input")?,
            }
        }
    }

    /// Prints places near a site
    async fn show_nearby(&mut self, site: &Site) -> Result<(), SessionError> {
        let places = match self.places.nearby(&mut self.dispatcher, site).await {
            Ok(places) => places,
            Err(e) => return self.report(e),
        };

        writeln!(self.output, "---------------")?;
        writeln!(self.output, "Places near {}", site.name())?;
        writeln!(self.output, "---------------")?;
        for place in &places {
            writeln!(self.output, "{}", place.render())?;
        }
        Ok(())
    }

    /// Prints a recoverable error, or escalates a fatal one
    fn report(&mut self, err: ScrapeError) -> Result<(), SessionError> {
        if err.is_fatal() {
            return Err(SessionError::Fatal(err));
        }
        debug!(error = %err, "Request failed");
        writeln!(self.output, "[Error] {err}")?;
        Ok(())
    }
}
