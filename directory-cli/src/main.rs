use std::io::{self, BufRead, Write};
use std::process;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use directory_client::{
    ClientConfig, Comment, DEFAULT_PER_PAGE, DirectoryClient, Gender, NewUser, Page, Post,
    RequestError, User, UserStatus, UserUpdate, UsersQuery,
};
use serde::Serialize;
use tracing::{debug, info};

mod logging;

use logging::{init_logging, log_level_from_env};

#[derive(Debug, Parser)]
#[command(name = "directory-cli", version, about = "CLI администратора Directory Service")]
struct Cli {
    /// Базовый URL сервиса (по умолчанию DIRECTORY_BASE_URL или gorest).
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Токен доступа (по умолчанию DIRECTORY_TOKEN).
    #[arg(long, global = true)]
    token: Option<String>,

    /// Печатать ответы как JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Список всех постов.
    Posts,
    /// Комментарии к посту.
    Comments {
        #[arg(long)]
        post_id: i64,
    },
    /// Управление пользователями.
    #[command(subcommand)]
    Users(UsersCommand),
}

#[derive(Debug, Subcommand)]
enum UsersCommand {
    /// Страница пользователей с фильтром по имени.
    List {
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
        #[arg(long, default_value_t = DEFAULT_PER_PAGE, value_parser = clap::value_parser!(u32).range(1..))]
        per_page: u32,
        #[arg(long, default_value = "")]
        name: String,
    },
    /// Создание пользователя (требует токен).
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// male | female
        #[arg(long)]
        gender: Gender,
        /// active | inactive
        #[arg(long)]
        status: UserStatus,
    },
    /// Обновление имени, email и статуса (требует токен).
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// active | inactive
        #[arg(long)]
        status: UserStatus,
    },
    /// Удаление пользователя (требует токен).
    ///
    /// Без `--yes` запрашивает подтверждение.
    Delete {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Ошибка: {err:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging(&log_level_from_env())?;

    let cli = Cli::parse();
    let config = resolve_config(cli.base_url, cli.token)?;
    debug!(base_url = %config.base_url, has_token = config.token.is_some(), "client config");

    let client = DirectoryClient::new(config).map_err(map_client_error)?;
    let json = cli.json;

    match cli.command {
        Command::Posts => {
            let posts = client.list_posts().await.map_err(map_client_error)?;
            if json {
                print_json(&posts)?;
            } else {
                print_posts(&posts);
            }
        }
        Command::Comments { post_id } => {
            let comments = client
                .list_comments(post_id)
                .await
                .map_err(map_client_error)?;
            if json {
                print_json(&comments)?;
            } else {
                print_comments(post_id, &comments);
            }
        }
        Command::Users(UsersCommand::List {
            page,
            per_page,
            name,
        }) => {
            let query = UsersQuery {
                page,
                per_page,
                name,
            };
            let users = client.list_users(&query).await.map_err(map_client_error)?;
            if json {
                print_json(&users)?;
            } else {
                print_users(&query, &users);
            }
        }
        Command::Users(UsersCommand::Create {
            name,
            email,
            gender,
            status,
        }) => {
            let user = NewUser {
                name: require_non_blank(&name, "Please input name.")?,
                email: require_non_blank(&email, "Please input email.")?,
                gender,
                status,
            };
            let created = client.create_user(&user).await.map_err(map_client_error)?;
            info!(id = created.id, "user created");
            if json {
                print_json(&created)?;
            } else {
                print_user("Пользователь создан", &created);
            }
        }
        Command::Users(UsersCommand::Update {
            id,
            name,
            email,
            status,
        }) => {
            let update = UserUpdate {
                name: require_non_blank(&name, "Please input name.")?,
                email: require_non_blank(&email, "Please input email.")?,
                status,
            };
            let updated = client
                .update_user(id, &update)
                .await
                .map_err(map_client_error)?;
            info!(id, "user updated");
            if json {
                print_json(&updated)?;
            } else {
                print_user("Пользователь обновлён", &updated);
            }
        }
        Command::Users(UsersCommand::Delete { id, yes }) => {
            let confirmed = yes
                || ask_confirmation(io::stdin().lock(), io::stdout().lock(), id)
                    .context("не удалось прочитать подтверждение")?;
            if !confirmed {
                println!("Удаление отменено");
                return Ok(());
            }
            client.delete_user(id).await.map_err(map_client_error)?;
            info!(id, "user deleted");
            println!("Пользователь удалён: id={id}");
        }
    }

    Ok(())
}

fn resolve_config(base_url: Option<String>, token: Option<String>) -> Result<ClientConfig> {
    let mut config = ClientConfig::from_env().map_err(map_client_error)?;
    if let Some(base_url) = base_url {
        config.base_url = normalize_base_url(base_url);
    }
    if let Some(token) = token {
        config = config.with_token(token);
    }
    Ok(config)
}

fn normalize_base_url(base_url: String) -> String {
    let base_url = base_url.trim();
    if base_url.starts_with("http://") || base_url.starts_with("https://") {
        return base_url.to_string();
    }

    format!("https://{base_url}")
}

fn require_non_blank(value: &str, message: &'static str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(anyhow!(message));
    }
    Ok(value.to_string())
}

/// Двухшаговое удаление: только явные `y`/`yes` подтверждают.
fn ask_confirmation(mut input: impl BufRead, mut output: impl Write, id: i64) -> io::Result<bool> {
    write!(output, "Удалить пользователя id={id}? Действие необратимо [y/N]: ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(is_confirmed(&answer))
}

fn is_confirmed(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn map_client_error(err: RequestError) -> anyhow::Error {
    let message = match err {
        RequestError::Unauthorized => {
            "требуется авторизация: задайте DIRECTORY_TOKEN или --token".to_string()
        }
        RequestError::NotFound => "ресурс не найден".to_string(),
        RequestError::Validation(issues) => {
            let details = issues
                .iter()
                .map(|issue| format!("{} {}", issue.field, issue.message))
                .collect::<Vec<_>>()
                .join("; ");
            format!("сервис отклонил данные: {details}")
        }
        RequestError::Status { status, message } => format!("ошибка HTTP {status}: {message}"),
        RequestError::Network(err) => format!("сервис недоступен: {err}"),
        RequestError::Decode(message) => format!("неожиданный ответ сервиса: {message}"),
        RequestError::InvalidConfig(message) => format!("некорректная конфигурация: {message}"),
    };
    anyhow!(message)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let raw = serde_json::to_string_pretty(value).context("не удалось сериализовать ответ")?;
    println!("{raw}");
    Ok(())
}

fn print_posts(posts: &[Post]) {
    println!("Постов: {}", posts.len());
    for post in posts {
        println!("- [{}] {} (user_id={})", post.id, post.title, post.user_id);
    }
}

fn print_comments(post_id: i64, comments: &[Comment]) {
    println!("Комментарии к посту {post_id}");
    if comments.is_empty() {
        println!("No comments available.");
        return;
    }
    for comment in comments {
        println!("- [{}] {} <{}>", comment.id, comment.name, comment.email);
        println!("  {}", comment.body);
    }
}

fn print_users(query: &UsersQuery, page: &Page<User>) {
    println!(
        "Страница {} (per_page={}, name={:?})",
        query.page, query.per_page, query.name
    );
    if page.items.is_empty() {
        println!("No Data Found");
    }
    for user in &page.items {
        println!(
            "- [{}] {} <{}> {} {}",
            user.id, user.name, user.email, user.gender, user.status
        );
    }
    if let Some(pagination) = page.pagination {
        println!(
            "Всего: {} (страниц: {})",
            pagination.total, pagination.pages
        );
    }
}

fn print_user(title: &str, user: &User) {
    println!("{title}");
    println!("id: {}", user.id);
    println!("name: {}", user.name);
    println!("email: {}", user.email);
    println!("gender: {}", user.gender);
    println!("status: {}", user.status);
}
