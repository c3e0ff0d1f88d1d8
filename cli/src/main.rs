use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use learn_platform::config::{ClientConfig, ConfigError};
use learn_platform::context::AppContext;
use learn_platform::models::{CourseDraft, LessonDraft, ProfileDraft, QuizDraft};
use learn_platform::net::error::ApiError;
use learn_platform::net::http::{HttpClient, Upload};
use learn_platform::router::{AppRoute, Navigation, evaluate};
use learn_platform::services::{auth, course, enrollment, lesson, profile, quiz};
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("not signed in; run `learn-cli sign-in <token>` first")]
    NotSignedIn,
    #[error("session has no user; run `learn-cli sign-in <token>` again")]
    MissingUser,
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "learn-cli", about = "Learning platform API and session CLI")]
struct Cli {
    #[arg(long, env = "LEARN_API_BASE_URL")]
    base_url: Option<String>,

    #[arg(long, env = "LEARN_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[arg(long, env = "LEARN_API_TIMEOUT_MS")]
    timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the Google OAuth entry URL.
    LoginUrl,
    /// Post a provider token to the OAuth callback.
    Callback { token: String },
    /// Exchange an authorization code through the OAuth callback.
    Exchange { code: String },
    /// Adopt a token and load its user into the session.
    SignIn { token: String },
    /// Show the persisted session.
    Whoami,
    /// Clear the persisted session.
    Logout,
    /// Run the navigation guard for a path against the current session.
    Route { path: String },
    Course(CourseCommand),
    Lesson(LessonCommand),
    Enrollment(EnrollmentCommand),
    Profile(ProfileCommand),
    Quiz(QuizCommand),
}

#[derive(Args, Debug)]
struct CourseCommand {
    #[command(subcommand)]
    command: CourseSubcommand,
}

#[derive(Subcommand, Debug)]
enum CourseSubcommand {
    List,
    Read {
        course_id: u64,
    },
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    Update {
        course_id: u64,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    Delete {
        course_id: u64,
    },
    Progress {
        course_id: u64,
    },
}

#[derive(Args, Debug)]
struct LessonCommand {
    #[command(subcommand)]
    command: LessonSubcommand,
}

#[derive(Args, Debug)]
struct LessonFields {
    #[arg(long)]
    course_id: u64,
    #[arg(long)]
    title: String,
    #[arg(long, default_value = "")]
    content: String,
    #[arg(long, default_value_t = 0)]
    order: i64,
    #[arg(long)]
    image: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum LessonSubcommand {
    List { course_id: u64 },
    Read { lesson_id: u64 },
    Create(LessonFields),
    Update {
        lesson_id: u64,
        #[command(flatten)]
        fields: LessonFields,
    },
    Delete { lesson_id: u64 },
}

#[derive(Args, Debug)]
struct EnrollmentCommand {
    #[command(subcommand)]
    command: EnrollmentSubcommand,
}

#[derive(Subcommand, Debug)]
enum EnrollmentSubcommand {
    Enroll {
        course_id: u64,
    },
    /// Defaults to the signed-in user.
    List {
        #[arg(long)]
        user_id: Option<u64>,
    },
    Cancel {
        enrollment_id: u64,
    },
}

#[derive(Args, Debug)]
struct ProfileCommand {
    #[command(subcommand)]
    command: ProfileSubcommand,
}

#[derive(Subcommand, Debug)]
enum ProfileSubcommand {
    Me,
    Read {
        user_id: u64,
    },
    /// Update the signed-in user's profile.
    Update {
        #[arg(long)]
        name: String,
        #[arg(long)]
        image: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct QuizCommand {
    #[command(subcommand)]
    command: QuizSubcommand,
}

#[derive(Subcommand, Debug)]
enum QuizSubcommand {
    List,
    Create {
        #[arg(long)]
        lesson_id: u64,
        #[arg(long)]
        question: String,
        #[arg(long = "option", required = true)]
        options: Vec<String>,
        #[arg(long)]
        answer: String,
    },
    Delete {
        quiz_id: u64,
    },
    Complete {
        quiz_id: u64,
        #[arg(long)]
        score: i64,
    },
    Results,
    Submit {
        quiz_id: u64,
        #[arg(long)]
        score: i64,
    },
    DeleteResult {
        result_id: u64,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url);
    }
    if let Some(session_file) = cli.session_file {
        config = config.with_session_file(session_file);
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config = config.with_request_timeout(Duration::from_millis(timeout_ms));
    }
    tracing::debug!(
        base_url = %config.base_url,
        session_file = %config.session_file.display(),
        "cli configured"
    );

    let mut ctx = AppContext::init(config)?;
    match cli.command {
        Command::LoginUrl => {
            let url = match ctx.session.login_with_google(ctx.client()) {
                Navigation::External(url) => url,
                Navigation::To(route) => route.path().to_owned(),
            };
            println!("{url}");
            Ok(())
        }
        Command::Callback { token } => print_json(&auth::handle_google_callback(ctx.client(), &token).await?),
        Command::Exchange { code } => print_json(&auth::exchange_code(ctx.client(), &code).await?),
        Command::SignIn { token } => run_sign_in(&mut ctx, &token).await,
        Command::Whoami => {
            let session = ctx.session.snapshot().await;
            print_json(&json!({
                "authenticated": session.is_authenticated(),
                "complete": session.is_complete(),
                "user": session.user,
            }))
        }
        Command::Logout => {
            let navigation = ctx.teardown().await;
            print_json(&navigation_json(&navigation))
        }
        Command::Route { path } => {
            let requested = AppRoute::from_path(&path);
            let decision = evaluate(requested, &ctx.session.snapshot().await);
            let landed = ctx.router.navigate(&path).await;
            print_json(&json!({
                "requested": requested.path(),
                "decision": format!("{decision:?}"),
                "landed": landed.path(),
            }))
        }
        Command::Course(command) => run_course(ctx.client(), command).await,
        Command::Lesson(command) => run_lesson(ctx.client(), command).await,
        Command::Enrollment(command) => run_enrollment(&ctx, command).await,
        Command::Profile(command) => run_profile(&ctx, command).await,
        Command::Quiz(command) => run_quiz(ctx.client(), command).await,
    }
}

async fn run_sign_in(ctx: &mut AppContext, token: &str) -> Result<(), CliError> {
    let next = ctx.sign_in(token).await;
    let session = ctx.session.snapshot().await;
    print_json(&json!({
        "user": session.user,
        "next": next.as_ref().map(navigation_json),
        "route": ctx.router.current().path(),
    }))
}

async fn run_course(client: &HttpClient, command: CourseCommand) -> Result<(), CliError> {
    match command.command {
        CourseSubcommand::List => print_json(&course::fetch_courses(client).await?),
        CourseSubcommand::Read { course_id } => print_json(&course::fetch_course(client, course_id).await?),
        CourseSubcommand::Create { title, description, image } => {
            let draft = CourseDraft { title, description, image: read_upload(image).await? };
            print_json(&course::create_course(client, draft).await?)
        }
        CourseSubcommand::Update { course_id, title, description, image } => {
            let draft = CourseDraft { title, description, image: read_upload(image).await? };
            print_json(&course::update_course(client, course_id, draft).await?)
        }
        CourseSubcommand::Delete { course_id } => {
            course::delete_course(client, course_id).await?;
            print_json(&json!({ "deleted": course_id }))
        }
        CourseSubcommand::Progress { course_id } => {
            print_json(&course::fetch_course_progress(client, course_id).await?)
        }
    }
}

async fn lesson_draft(fields: LessonFields) -> Result<LessonDraft, CliError> {
    Ok(LessonDraft {
        course_id: fields.course_id,
        title: fields.title,
        content: fields.content,
        order: fields.order,
        image: read_upload(fields.image).await?,
    })
}

async fn run_lesson(client: &HttpClient, command: LessonCommand) -> Result<(), CliError> {
    match command.command {
        LessonSubcommand::List { course_id } => {
            print_json(&lesson::fetch_lessons_by_course(client, course_id).await?)
        }
        LessonSubcommand::Read { lesson_id } => print_json(&lesson::fetch_lesson(client, lesson_id).await?),
        LessonSubcommand::Create(fields) => {
            let draft = lesson_draft(fields).await?;
            print_json(&lesson::create_lesson(client, draft).await?)
        }
        LessonSubcommand::Update { lesson_id, fields } => {
            let draft = lesson_draft(fields).await?;
            print_json(&lesson::update_lesson(client, lesson_id, draft).await?)
        }
        LessonSubcommand::Delete { lesson_id } => {
            lesson::delete_lesson(client, lesson_id).await?;
            print_json(&json!({ "deleted": lesson_id }))
        }
    }
}

async fn run_enrollment(ctx: &AppContext, command: EnrollmentCommand) -> Result<(), CliError> {
    let client = ctx.client();
    match command.command {
        EnrollmentSubcommand::Enroll { course_id } => print_json(&enrollment::enroll(client, course_id).await?),
        EnrollmentSubcommand::List { user_id } => {
            let user_id = match user_id {
                Some(user_id) => user_id,
                None => signed_in_user_id(ctx).await?,
            };
            print_json(&enrollment::fetch_enrollments(client, user_id).await?)
        }
        EnrollmentSubcommand::Cancel { enrollment_id } => {
            enrollment::cancel_enrollment(client, enrollment_id).await?;
            print_json(&json!({ "cancelled": enrollment_id }))
        }
    }
}

async fn run_profile(ctx: &AppContext, command: ProfileCommand) -> Result<(), CliError> {
    let client = ctx.client();
    match command.command {
        ProfileSubcommand::Me => print_json(&profile::fetch_my_profile(client).await?),
        ProfileSubcommand::Read { user_id } => print_json(&profile::fetch_profile(client, user_id).await?),
        ProfileSubcommand::Update { name, image } => {
            let user_id = signed_in_user_id(ctx).await?;
            let draft = ProfileDraft { name, image: read_upload(image).await? };
            let user = profile::update_profile(client, user_id, draft).await?;
            ctx.session.set_user(user.clone()).await;
            print_json(&user)
        }
    }
}

async fn run_quiz(client: &HttpClient, command: QuizCommand) -> Result<(), CliError> {
    match command.command {
        QuizSubcommand::List => print_json(&quiz::fetch_quizzes(client).await?),
        QuizSubcommand::Create { lesson_id, question, options, answer } => {
            let draft = QuizDraft { lesson_id, question, options, answer };
            print_json(&quiz::create_quiz(client, draft).await?)
        }
        QuizSubcommand::Delete { quiz_id } => {
            quiz::delete_quiz(client, quiz_id).await?;
            print_json(&json!({ "deleted": quiz_id }))
        }
        QuizSubcommand::Complete { quiz_id, score } => print_json(&quiz::complete_quiz(client, quiz_id, score).await?),
        QuizSubcommand::Results => print_json(&quiz::fetch_quiz_results(client).await?),
        QuizSubcommand::Submit { quiz_id, score } => {
            print_json(&quiz::submit_quiz_result(client, quiz_id, score).await?)
        }
        QuizSubcommand::DeleteResult { result_id } => {
            quiz::delete_quiz_result(client, result_id).await?;
            print_json(&json!({ "deleted": result_id }))
        }
    }
}

async fn signed_in_user_id(ctx: &AppContext) -> Result<u64, CliError> {
    let session = ctx.session.snapshot().await;
    if !session.is_authenticated() {
        return Err(CliError::NotSignedIn);
    }
    session.user.map(|user| user.id).ok_or(CliError::MissingUser)
}

async fn read_upload(path: Option<PathBuf>) -> Result<Option<Upload>, CliError> {
    match path {
        Some(path) => Ok(Some(Upload::from_path(&path).await?)),
        None => Ok(None),
    }
}

fn navigation_json(navigation: &Navigation) -> Value {
    match navigation {
        Navigation::To(route) => json!({ "route": route.path() }),
        Navigation::External(url) => json!({ "external": url }),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_lesson_update() {
        let cli = Cli::try_parse_from([
            "learn-cli",
            "lesson",
            "update",
            "7",
            "--course-id",
            "5",
            "--title",
            "Intro",
            "--order",
            "2",
        ])
        .unwrap();
        let Command::Lesson(LessonCommand { command: LessonSubcommand::Update { lesson_id, fields } }) = cli.command
        else {
            panic!("expected lesson update");
        };
        assert_eq!((lesson_id, fields.course_id, fields.order), (7, 5, 2));
        assert_eq!(fields.content, "");
        assert!(fields.image.is_none());
    }

    #[test]
    fn quiz_create_collects_repeated_options() {
        let cli = Cli::try_parse_from([
            "learn-cli", "quiz", "create", "--lesson-id", "3", "--question", "2+2?", "--option", "3", "--option", "4",
            "--answer", "4",
        ])
        .unwrap();
        let Command::Quiz(QuizCommand { command: QuizSubcommand::Create { options, .. } }) = cli.command else {
            panic!("expected quiz create");
        };
        assert_eq!(options, vec!["3", "4"]);
    }

    #[test]
    fn navigation_json_shapes() {
        assert_eq!(navigation_json(&Navigation::To(AppRoute::Login)), json!({"route": "/login"}));
        assert_eq!(
            navigation_json(&Navigation::External("http://x/auth".into())),
            json!({"external": "http://x/auth"})
        );
    }
}
