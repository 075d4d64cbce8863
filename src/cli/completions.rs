use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    grinderctl completions bash > ~/.bash_completion.d/grinderctl\n\n\
                  Generate zsh completions:\n    grinderctl completions zsh > ~/.zfunc/_grinderctl\n\n\
                  Generate fish completions:\n    grinderctl completions fish > ~/.config/fish/completions/grinderctl.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
