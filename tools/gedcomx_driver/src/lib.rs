//! Contains the main `run()` function for the `gedcomx` tool.

use std::{
    io::Write,
    path::{Path, PathBuf},
    process::ExitCode,
};

use gedcomx_extension::{Lookup, Registry};
use gedcomx_metadata::{
    capability::{AnyResource, Resource},
    catalog,
    format::{self, Format},
    resource_set::ResourceSet,
    Decoded, ReadOptions,
};

/// The document format given on the command line.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, clap::ValueEnum,
)]
pub enum DocumentFormat {
    /// A JSON document.
    #[clap(name = "json")]
    Json,

    /// A RON document.
    #[clap(name = "ron")]
    Ron,

    /// An XML document.
    #[clap(name = "xml")]
    Xml,
}

impl From<DocumentFormat> for Format {
    fn from(value: DocumentFormat) -> Self {
        match value {
            DocumentFormat::Json => Self::Json,
            DocumentFormat::Ron => Self::Ron,
            DocumentFormat::Xml => Self::Xml,
        }
    }
}

/// The arguments to the program.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, clap::Parser)]
#[clap(
    name = "gedcomx",
    about = "Inspects and converts GEDCOM X resource set documents",
    author = "Simmypeet"
)]
pub struct Arguments {
    /// The command to run.
    #[clap(subcommand)]
    pub command: Command,
}

/// The commands of the program.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, clap::Subcommand,
)]
pub enum Command {
    /// Lists the extension elements of a document.
    Inspect(Input),

    /// Rewrites a document in another format.
    Convert(Convert),
}

/// The document to read.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, clap::Args)]
pub struct Input {
    /// The path to the document.
    pub file: PathBuf,

    /// The format of the document. If not specified, the format is inferred
    /// from the file extension.
    #[clap(short, long, visible_alias = "from")]
    pub format: Option<DocumentFormat>,

    /// Fails on extension elements whose type identifier is not known instead
    /// of skipping them.
    #[clap(long)]
    pub strict: bool,
}

/// The arguments of the `convert` command.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, clap::Args)]
pub struct Convert {
    /// The document to convert.
    #[clap(flatten)]
    pub input: Input,

    /// The format to convert to. If not specified, the format is inferred
    /// from the output path, or else is RON for a JSON input and JSON for any
    /// other input.
    #[clap(short, long)]
    pub to: Option<DocumentFormat>,

    /// The path to write the converted document to. If not specified, the
    /// document is written to the standard output.
    #[clap(short, long)]
    pub output: Option<PathBuf>,
}

/// An error that stops a command.
#[derive(Debug, thiserror::Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error("{}: {source}", .path.display())]
    Io { path: PathBuf, source: std::io::Error },

    #[error("failed to write the output: {0}")]
    Output(#[source] std::io::Error),

    #[error(
        "cannot infer the document format of `{}`, pass `--format` \
         explicitly",
        .0.display()
    )]
    UnknownFormat(PathBuf),

    #[error("{}: {source}", .path.display())]
    Document { path: PathBuf, source: format::Error },
}

impl Input {
    fn format(&self) -> Result<Format, Error> {
        self.format.map(Format::from).map_or_else(
            || {
                Format::from_path(&self.file)
                    .ok_or_else(|| Error::UnknownFormat(self.file.clone()))
            },
            Ok,
        )
    }

    fn read(
        &self,
        registry: &Registry,
        err_writer: &mut dyn Write,
    ) -> Result<(Format, ResourceSet), Error> {
        let format = self.format()?;

        let source = std::fs::read_to_string(&self.file)
            .map_err(|source| Error::Io { path: self.file.clone(), source })?;

        let options = if self.strict {
            ReadOptions::strict()
        } else {
            ReadOptions::default()
        };

        let Decoded { value, skipped } =
            format::read(&source, registry, format, options).map_err(
                |source| Error::Document { path: self.file.clone(), source },
            )?;

        for unresolved in skipped {
            writeln!(
                err_writer,
                "warning: {}: skipped: {unresolved}",
                self.file.display()
            )
            .map_err(Error::Output)?;
        }

        Ok((format, value))
    }
}

fn inspect(
    input: &Input,
    registry: &Registry,
    err_writer: &mut dyn Write,
    out_writer: &mut dyn Write,
) -> Result<(), Error> {
    let (_, resource_set) = input.read(registry, err_writer)?;

    writeln!(
        out_writer,
        "resource set `{}` with {} extension elements",
        resource_set.id().unwrap_or("<anonymous>"),
        resource_set.extensions().len()
    )
    .map_err(Error::Output)?;

    for (index, element) in resource_set.extensions().all().enumerate() {
        let identifier =
            registry.identifier_of_element(element).unwrap_or("<unknown>");
        let id = AnyResource::lookup(element).map_or("-", Resource::id);

        writeln!(out_writer, "{index}\t{identifier}\t{id}")
            .map_err(Error::Output)?;
    }

    Ok(())
}

fn target_format(
    to: Option<DocumentFormat>,
    output: Option<&Path>,
    from: Format,
) -> Format {
    to.map(Format::from)
        .or_else(|| output.and_then(Format::from_path))
        .unwrap_or(match from {
            Format::Json => Format::Ron,
            Format::Ron | Format::Xml => Format::Json,
        })
}

fn convert(
    convert: &Convert,
    registry: &Registry,
    err_writer: &mut dyn Write,
    out_writer: &mut dyn Write,
) -> Result<(), Error> {
    let (from, resource_set) = convert.input.read(registry, err_writer)?;
    let to = target_format(convert.to, convert.output.as_deref(), from);

    let document = format::write(&resource_set, registry, to).map_err(
        |source| Error::Document { path: convert.input.file.clone(), source },
    )?;

    match &convert.output {
        Some(path) => {
            std::fs::write(path, document + "\n")
                .map_err(|source| Error::Io { path: path.clone(), source })?;

            log::info!(
                "converted `{}` to `{}`",
                convert.input.file.display(),
                path.display()
            );
        }

        None => writeln!(out_writer, "{document}").map_err(Error::Output)?,
    }

    Ok(())
}

/// Runs the program with the given arguments.
///
/// Errors are reported as a single `error: ...` line on `err_writer`.
#[must_use]
pub fn run(
    argument: Arguments,
    err_writer: &mut dyn Write,
    out_writer: &mut dyn Write,
) -> ExitCode {
    let registry = catalog::registry();

    let result = match &argument.command {
        Command::Inspect(input) => {
            inspect(input, &registry, err_writer, out_writer)
        }
        Command::Convert(arguments) => {
            convert(arguments, &registry, err_writer, out_writer)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::debug!("command failed: {error:?}");

            // nothing else to report to if the error stream is broken
            let _ = writeln!(err_writer, "error: {error}");
            ExitCode::FAILURE
        }
    }
}
