//! REPL command parsing.

/// `(name, arguments, description)` of every slash command.
pub const COMMANDS: &[(&str, &str, &str)] = &[
    ("/name", "<patient name>", "Set the patient name"),
    ("/problem", "<symptoms>", "Describe the problem"),
    ("/priority", "<high|medium|low>", "Set the priority"),
    ("/submit", "", "Request an AI recommendation"),
    ("/sessions", "", "List this session's recommendations"),
    ("/form", "", "Show the current consultation draft"),
    ("/login", "", "Log in with the entered username and password"),
    ("/signup", "", "Register with the entered account fields"),
    ("/mode", "", "Switch the auth form between login and signup"),
    ("/auth", "<field> <value>", "Set an auth field (username, first_name, ..., role, password)"),
    ("/logout", "[--forget]", "Log out; --forget also removes the saved login"),
    ("/whoami", "", "Show the signed-in user"),
    ("/help", "", "Show this help"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Name(String),
    Problem(String),
    Priority(String),
    Submit,
    Sessions,
    Form,
    Login,
    Signup,
    Mode,
    Auth { field: String, value: String },
    Logout { forget: bool },
    Whoami,
    Help,
    Quit,
    /// A slash command that is unknown or missing its arguments.
    Invalid(String),
}

impl Command {
    /// Parses one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        if line == "quit" || line == "exit" {
            return Some(Command::Quit);
        }

        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        let command = match name {
            "/name" => Command::Name(rest.to_string()),
            "/problem" => Command::Problem(rest.to_string()),
            "/priority" if !rest.is_empty() => Command::Priority(rest.to_string()),
            "/submit" => Command::Submit,
            "/sessions" => Command::Sessions,
            "/form" => Command::Form,
            "/login" => Command::Login,
            "/signup" => Command::Signup,
            "/mode" => Command::Mode,
            "/auth" => match rest.split_once(char::is_whitespace) {
                Some((field, value)) => Command::Auth {
                    field: field.to_string(),
                    value: value.trim().to_string(),
                },
                None => Command::Invalid("Usage: /auth <field> <value>".to_string()),
            },
            "/logout" => Command::Logout {
                forget: rest == "--forget",
            },
            "/whoami" => Command::Whoami,
            "/help" => Command::Help,
            "/priority" => Command::Invalid("Usage: /priority <high|medium|low>".to_string()),
            other => Command::Invalid(format!("Unknown command: {}", other)),
        };
        Some(command)
    }
}

/// Argument hint for a fully typed command name.
pub fn usage(name: &str) -> Option<&'static str> {
    COMMANDS
        .iter()
        .find(|(cmd, args, _)| *cmd == name && !args.is_empty())
        .map(|(_, args, _)| *args)
}
