/// Global flags available before or after subcommands.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub quiet: bool,
    pub verbose: bool,
    /// Extra TOML config layer merged with highest file precedence.
    pub config: Option<String>,
}
