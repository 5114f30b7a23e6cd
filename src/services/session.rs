use std::io::{BufRead, Write};

use anyhow::Result;
use rand::Rng;

use crate::core::index::VerseIndex;
use crate::core::random::pick_random;
use crate::core::reference::{parse_reference, VerseAddress};
use crate::services::display::{CommentarySource, PassageSource, VerseReader};

pub const WELCOME: &str = "Welcome to the Truly Random Bible Verse Generator!";
pub const FAREWELL: &str = "May the verses illuminate your path.";
pub const END_OF_INDEX: &str = "You've reached the end of the Bible!";

/// Line-oriented prompts over any reader/writer pair.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console { input, output }
    }

    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Prints `prompt` and reads one trimmed line. End of input reads as "".
    /// Bytes that are not UTF-8 are replaced rather than rejected.
    pub fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = Vec::new();
        self.input.read_until(b'\n', &mut line)?;
        Ok(String::from_utf8_lossy(&line).trim().to_string())
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Walk forward one verse at a time from `address`.
    Sequential {
        address: VerseAddress,
        heading: &'static str,
    },
    /// Draw verses at random, optionally from one book.
    Random { book: Option<String> },
    /// Step forward from a random pick while still offering a fresh draw.
    RandomWalk {
        address: VerseAddress,
        book: Option<String>,
    },
}

const SELECTED_HEADING: &str = "Selected Bible Verse";
const RANDOM_HEADING: &str = "Truly Random Verse";
const NEXT_HEADING: &str = "Next Sequential Verse";

pub struct Session<'a, P, C, G> {
    index: &'a VerseIndex,
    reader: &'a VerseReader<P, C>,
    rng: G,
    persona: Option<String>,
}

impl<'a, P, C, G> Session<'a, P, C, G>
where
    P: PassageSource,
    C: CommentarySource,
    G: Rng,
{
    pub fn new(index: &'a VerseIndex, reader: &'a VerseReader<P, C>, rng: G) -> Self {
        Session {
            index,
            reader,
            rng,
            persona: None,
        }
    }

    pub async fn run<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        console.say(WELCOME)?;
        console.say(
            "First, would you like the context to come from a specific persona \
             (e.g., Jesus, Mary, Ernest Hemingway)?",
        )?;
        let persona = console.ask("Enter a persona or press Enter for default context: ")?;
        self.persona = (!persona.is_empty()).then_some(persona);

        let mut mode = Some(self.choose_mode(console)?);
        while let Some(current) = mode {
            mode = self.step(console, current).await?;
        }

        console.say(&format!("\n{}", FAREWELL))?;
        Ok(())
    }

    pub fn choose_mode<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> Result<Mode> {
        console.say(
            "\nSelect mode: (1) Pick a specific verse (e.g., John 2:14) or (2) Get a random verse",
        )?;
        let mut choice = console.ask("Enter 1 or 2: ")?;

        if choice == "1" {
            let input = console.ask("Enter the book, chapter, and verse (e.g., John 2:14): ")?;
            match parse_reference(self.index, &input) {
                Ok(address) => {
                    log::info!("Starting at {}", address);
                    return Ok(Mode::Sequential {
                        address,
                        heading: SELECTED_HEADING,
                    });
                }
                Err(e) => {
                    log::warn!("Rejected reference '{}': {}", input, e);
                    console.say(&format!("Error: {}. Defaulting to random mode.", e))?;
                    choice = String::from("2");
                }
            }
        }

        let mut book = None;
        if choice == "2" {
            console.say("\nFor random mode: (1) All books or (2) A specific book")?;
            if console.ask("Enter 1 or 2: ")? == "2" {
                let name = console.ask("Enter the name of the book (e.g., Tobit): ")?;
                match self.index.book(&name) {
                    Some(found) => book = Some(found.key().to_string()),
                    None => {
                        log::warn!("Unknown book '{}'", name);
                        console.say(&format!(
                            "Book '{}' not recognized. Picking from all books.",
                            name
                        ))?;
                    }
                }
            }
        }

        Ok(Mode::Random { book })
    }

    /// Shows one verse, asks what to do next and returns the next mode.
    /// `None` ends the session.
    pub async fn step<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
        mode: Mode,
    ) -> Result<Option<Mode>> {
        match mode {
            Mode::Sequential { address, heading } => {
                self.show(console, heading, &address).await?;

                let choice = console.ask(
                    "\nNext action: (1) Next sequential verse or (2) Exit\nEnter 1 or 2: ",
                )?;
                if choice != "1" {
                    return Ok(None);
                }
                Ok(self
                    .advance(console, &address)?
                    .map(|address| Mode::Sequential { address, heading }))
            }
            Mode::Random { book } => {
                let address = pick_random(self.index, book.as_deref(), &mut self.rng)?;
                log::info!("Random pick {}", address);
                self.show(console, RANDOM_HEADING, &address).await?;
                self.after_random(console, address, book)
            }
            Mode::RandomWalk { address, book } => {
                self.show(console, NEXT_HEADING, &address).await?;
                self.after_random(console, address, book)
            }
        }
    }

    fn after_random<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
        address: VerseAddress,
        book: Option<String>,
    ) -> Result<Option<Mode>> {
        let choice = console.ask(
            "\nNext action: (1) Another random verse or (2) Next sequential verse\nEnter 1 or 2: ",
        )?;
        match choice.as_str() {
            "1" => Ok(Some(Mode::Random { book })),
            "2" => Ok(self
                .advance(console, &address)?
                .map(|address| Mode::RandomWalk { address, book })),
            _ => Ok(None),
        }
    }

    fn advance<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
        address: &VerseAddress,
    ) -> Result<Option<VerseAddress>> {
        let next = self
            .index
            .get_next_verse(&address.book, address.chapter, address.verse)?;
        if next.is_none() {
            log::info!("Index exhausted after {}", address);
            console.say(END_OF_INDEX)?;
        }
        Ok(next)
    }

    async fn show<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
        heading: &str,
        address: &VerseAddress,
    ) -> Result<()> {
        let block = self
            .reader
            .render(self.index, address, self.persona.as_deref())
            .await;
        console.say(&format!(
            "\n--- {} ({}) ---",
            heading,
            self.reader.translation()
        ))?;
        console.say(&block)
    }
}
