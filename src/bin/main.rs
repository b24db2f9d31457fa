use anyhow::{Context, Error};
use craftpanel::{
    Config, Decision, FileStore, HttpApi, ProfileUpdate, Registration,
    RouteGuard, SessionManager,
};
use std::{path::PathBuf, time::Duration};
use structopt::StructOpt;
use url::Url;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Error> {
    env_logger::init();
    let args = Args::from_args();

    log::debug!("Using the API at {}", args.api);

    let config = args.config();
    let api = HttpApi::from_config(&config)
        .context("Unable to create the HTTP client")?;
    let store = FileStore::new(&config.token_file);
    let manager = SessionManager::new(api, store);

    manager.restore().await;

    let succeeded = match args.command {
        Command::Login { email, password } => {
            manager.login(&email, &password).await
        },
        Command::Register {
            username,
            email,
            password,
            plan,
        } => {
            let registration = Registration {
                username,
                email,
                password,
                plan,
            };
            manager.register(&registration).await
        },
        Command::Logout => {
            manager.logout().await;
            true
        },
        Command::Whoami => {
            match manager.snapshot().user {
                Some(user) => println!(
                    "{} <{}> [{}] on the \"{}\" plan ({} servers, {} MB \
                     memory)",
                    user.username,
                    user.email,
                    user.id,
                    user.plan,
                    user.resource_limits.max_servers,
                    user.resource_limits.memory,
                ),
                None => println!("Not logged in"),
            }
            true
        },
        Command::UpdateProfile { username, email } => {
            let update = ProfileUpdate { username, email };
            if update.is_empty() {
                anyhow::bail!("Nothing to update");
            }
            manager.update_profile(&update).await
        },
        Command::ChangePassword { current, new } => {
            manager.change_password(&current, &new).await
        },
        Command::ForgotPassword { email } => {
            manager.forgot_password(&email).await
        },
        Command::ResetPassword { token, password } => {
            manager.reset_password(&token, &password).await
        },
        Command::VerifyEmail { token } => manager.verify_email(&token).await,
        Command::Check { path } => {
            let guard = RouteGuard::default();
            let mut sessions = manager.subscribe();

            match guard.settle(&mut sessions).await {
                Decision::Allow => println!("{}: allowed", path),
                Decision::Redirect(to) => {
                    println!("{}: redirect to {}", path, to)
                },
                Decision::Loading => println!("{}: still loading", path),
            }
            true
        },
    };

    if !succeeded {
        let message = manager
            .snapshot()
            .last_error
            .unwrap_or_else(|| String::from("The operation failed"));
        anyhow::bail!(message);
    }

    log::debug!("Finished with {:?}", manager.snapshot().state);

    Ok(())
}

#[derive(Debug, StructOpt)]
struct Args {
    #[structopt(
        long = "api",
        default_value = "http://localhost:5000/api",
        help = "The root of the panel's REST API"
    )]
    api: Url,
    #[structopt(
        long = "token-file",
        default_value = ".craftpanel/session.json",
        parse(from_os_str),
        help = "Where to keep the session token between runs"
    )]
    token_file: PathBuf,
    #[structopt(
        long = "timeout",
        help = "Give up on requests after this many seconds"
    )]
    timeout: Option<u64>,
    #[structopt(subcommand)]
    command: Command,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            token_file: self.token_file.clone(),
            timeout: self.timeout.map(Duration::from_secs),
            ..Config::new(self.api.clone())
        }
    }
}

#[derive(Debug, StructOpt)]
enum Command {
    #[structopt(about = "Log in and remember the session")]
    Login {
        #[structopt(short = "e", long = "email")]
        email: String,
        #[structopt(short = "p", long = "password")]
        password: String,
    },
    #[structopt(about = "Create a new account")]
    Register {
        #[structopt(short = "u", long = "username")]
        username: String,
        #[structopt(short = "e", long = "email")]
        email: String,
        #[structopt(short = "p", long = "password")]
        password: String,
        #[structopt(long = "plan", default_value = "free")]
        plan: String,
    },
    #[structopt(about = "Forget the current session")]
    Logout,
    #[structopt(about = "Show who is logged in")]
    Whoami,
    #[structopt(about = "Change your username or email")]
    UpdateProfile {
        #[structopt(short = "u", long = "username")]
        username: Option<String>,
        #[structopt(short = "e", long = "email")]
        email: Option<String>,
    },
    #[structopt(about = "Change your password")]
    ChangePassword {
        #[structopt(long = "current")]
        current: String,
        #[structopt(long = "new")]
        new: String,
    },
    #[structopt(about = "Email yourself a password reset link")]
    ForgotPassword {
        #[structopt(short = "e", long = "email")]
        email: String,
    },
    #[structopt(about = "Set a new password using a reset token")]
    ResetPassword {
        token: String,
        #[structopt(short = "p", long = "password")]
        password: String,
    },
    #[structopt(about = "Confirm your email address")]
    VerifyEmail { token: String },
    #[structopt(about = "Would a protected page be shown?")]
    Check {
        #[structopt(default_value = "/dashboard")]
        path: String,
    },
}
