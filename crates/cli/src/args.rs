//! Command-line definition.

use std::path::PathBuf;

use acl::AccessMask;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use security::ObjectKind;

/// Grant principals rights on a service or file DACL.
///
/// New allow entries are placed after explicit deny entries and before
/// inherited entries. An existing explicit allow entry for the principal is
/// widened in place.
#[derive(Parser, Debug)]
#[command(name = "svcperm")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (repeatable).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only report errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Ensure principals hold rights on an object.
    Grant(GrantArgs),

    /// Print an object's DACL.
    Show(ShowArgs),
}

/// Where the object lives.
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Kind of object.
    #[arg(long, value_enum, default_value_t = Kind::Service)]
    pub kind: Kind,

    /// Read and write `<DIR>/<OBJECT>.dacl` instead of the live object.
    #[arg(long, value_name = "DIR")]
    pub blob_dir: Option<PathBuf>,
}

/// Arguments for `grant`.
#[derive(Args, Debug)]
pub struct GrantArgs {
    /// Service name or file path.
    #[arg(value_name = "OBJECT")]
    pub object: String,

    /// Principal to grant to: a well-known alias or a textual SID
    /// (repeatable, default: interactive).
    #[arg(long = "principal", short = 'p', value_name = "NAME|SID")]
    pub principals: Vec<String>,

    /// Right to grant (repeatable, default: start).
    #[arg(long = "right", short = 'r', value_enum, value_name = "RIGHT")]
    pub rights: Vec<Right>,

    /// Compute and report the result without writing it.
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Object location.
    #[command(flatten)]
    pub target: TargetArgs,
}

/// Arguments for `show`.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Service name or file path.
    #[arg(value_name = "OBJECT")]
    pub object: String,

    /// Object location.
    #[command(flatten)]
    pub target: TargetArgs,
}

/// Object kind accepted on the command line.
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum Kind {
    /// A service.
    #[default]
    Service,
    /// A file or directory.
    File,
}

impl From<Kind> for ObjectKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Service => Self::Service,
            Kind::File => Self::File,
        }
    }
}

/// Named access rights.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum Right {
    /// Query the service configuration.
    QueryConfig,
    /// Change the service configuration.
    ChangeConfig,
    /// Query the service status.
    QueryStatus,
    /// Enumerate dependent services.
    EnumerateDependents,
    /// Start the service.
    Start,
    /// Stop the service.
    Stop,
    /// Pause or continue the service.
    PauseContinue,
    /// Ask the service to report its status.
    Interrogate,
    /// Send user-defined control codes.
    UserDefinedControl,
    /// Every service right plus the standard rights.
    All,
    /// Delete the object.
    Delete,
    /// Read the security descriptor.
    ReadControl,
    /// Modify the DACL.
    WriteDac,
    /// Change the owner.
    WriteOwner,
}

impl Right {
    /// Bits this right stands for.
    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            Self::QueryConfig => AccessMask::SERVICE_QUERY_CONFIG,
            Self::ChangeConfig => AccessMask::SERVICE_CHANGE_CONFIG,
            Self::QueryStatus => AccessMask::SERVICE_QUERY_STATUS,
            Self::EnumerateDependents => AccessMask::SERVICE_ENUMERATE_DEPENDENTS,
            Self::Start => AccessMask::SERVICE_START,
            Self::Stop => AccessMask::SERVICE_STOP,
            Self::PauseContinue => AccessMask::SERVICE_PAUSE_CONTINUE,
            Self::Interrogate => AccessMask::SERVICE_INTERROGATE,
            Self::UserDefinedControl => AccessMask::SERVICE_USER_DEFINED_CONTROL,
            Self::All => AccessMask::SERVICE_ALL_ACCESS,
            Self::Delete => AccessMask::DELETE,
            Self::ReadControl => AccessMask::READ_CONTROL,
            Self::WriteDac => AccessMask::WRITE_DAC,
            Self::WriteOwner => AccessMask::WRITE_OWNER,
        }
    }
}

/// Default principal when none is given.
pub const DEFAULT_PRINCIPAL: &str = "interactive";

/// Default right when none is given.
pub const DEFAULT_RIGHT: Right = Right::Start;

impl GrantArgs {
    /// Principals to grant to, falling back to [`DEFAULT_PRINCIPAL`].
    pub fn principal_names(&self) -> Vec<&str> {
        if self.principals.is_empty() {
            vec![DEFAULT_PRINCIPAL]
        } else {
            self.principals.iter().map(String::as_str).collect()
        }
    }

    /// Union of the requested rights, falling back to [`DEFAULT_RIGHT`].
    pub fn mask(&self) -> AccessMask {
        if self.rights.is_empty() {
            return AccessMask::from_raw(DEFAULT_RIGHT.bits());
        }
        self.rights
            .iter()
            .fold(AccessMask::default(), |mask, right| {
                mask | AccessMask::from_raw(right.bits())
            })
    }
}
