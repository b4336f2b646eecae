use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use eyecare_core::session::{AuthError, Credentials, RegistrationProfile, UserRole};
use eyecare_interaction::EyecareClient;
use std::io::{self, BufRead, IsTerminal, Write};

pub struct RegisterArgs {
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub first_name: String,
    pub last_name: String,
    pub specialization: Option<String>,
    pub license_number: Option<String>,
}

fn prompt(label: &str) -> Result<String> {
    eprint!("{label}: ");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Reads a secret without echo; piped input falls back to a plain line.
fn prompt_secret(label: &str) -> Result<String> {
    if !io::stdin().is_terminal() {
        return prompt(label);
    }
    eprint!("{label}: ");
    io::stderr().flush()?;

    enable_raw_mode().context("Failed to switch the terminal to raw mode")?;
    let secret = read_secret();
    disable_raw_mode().context("Failed to restore the terminal")?;
    eprintln!();
    secret
}

#[derive(Debug, PartialEq, Eq)]
enum SecretInput {
    Pending,
    Done,
    Cancelled,
}

fn read_secret() -> Result<String> {
    let mut secret = String::new();
    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        match feed_key(&mut secret, key) {
            SecretInput::Pending => {}
            SecretInput::Done => return Ok(secret),
            SecretInput::Cancelled => anyhow::bail!("Cancelled"),
        }
    }
}

fn feed_key(secret: &mut String, key: KeyEvent) -> SecretInput {
    if key.kind == KeyEventKind::Release {
        return SecretInput::Pending;
    }
    match key.code {
        KeyCode::Enter => return SecretInput::Done,
        KeyCode::Esc => return SecretInput::Cancelled,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return SecretInput::Cancelled;
        }
        KeyCode::Char(c) => secret.push(c),
        KeyCode::Backspace => {
            secret.pop();
        }
        _ => {}
    }
    SecretInput::Pending
}

fn auth_failure(err: AuthError) -> anyhow::Error {
    anyhow::anyhow!(err.user_message())
}

pub async fn login(client: &EyecareClient, username: String, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => prompt_secret("Password")?,
    };
    let session = client
        .auth()
        .login(&Credentials::new(username, password))
        .await
        .map_err(auth_failure)?;
    println!("Signed in as {} ({})", session.display_name, session.role);
    Ok(())
}

pub async fn register(client: &EyecareClient, args: RegisterArgs) -> Result<()> {
    let password = prompt_secret("Password")?;
    let password2 = prompt_secret("Confirm password")?;
    let profile = RegistrationProfile {
        username: args.username,
        email: args.email,
        password,
        password2,
        role: args.role,
        first_name: args.first_name,
        last_name: args.last_name,
        specialization: args.specialization,
        license_number: args.license_number,
    };
    let session = client
        .auth()
        .register(&profile)
        .await
        .map_err(auth_failure)?;
    println!(
        "Account created. Signed in as {} ({})",
        session.display_name, session.role
    );
    Ok(())
}

pub async fn logout(client: &EyecareClient) -> Result<()> {
    client.auth().logout().await.map_err(auth_failure)?;
    println!("Signed out");
    Ok(())
}

pub fn whoami(client: &EyecareClient) {
    match client.auth().current_session() {
        Some(session) => {
            println!("{} ({}) - {}", session.display_name, session.username, session.role);
            let caps = client.auth().capabilities();
            let mut allowed = Vec::new();
            if caps.can_upload_scans {
                allowed.push("upload scans");
            }
            if caps.can_request_consultation {
                allowed.push("request consultations");
            }
            if caps.can_act_on_consultations {
                allowed.push("act on consultations");
            }
            if caps.can_review_scans {
                allowed.push("review scans");
            }
            if caps.can_view_all_consultations {
                allowed.push("view all consultations");
            }
            if !allowed.is_empty() {
                println!("Can: {}", allowed.join(", "));
            }
        }
        None => println!("Not signed in"),
    }
}
