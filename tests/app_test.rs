use async_trait::async_trait;
use painless::loader::Component;
use painless::mock::MockWorkflow;
use painless::{
    App, AppRegistry, BuildError, Compiler, Config, ContentType, EntryPoint, HttpEnvironment,
    LoadError, Method, RenderError, Request, Response, Workflow, WorkflowResult,
};
use serde_json::json;

struct Greeting(&'static str);

#[async_trait]
impl Workflow for Greeting {
    async fn get(&self, request: &Request) -> WorkflowResult {
        let who = request.params().at(0).unwrap_or("world");
        Ok(Response::ok(json!(format!("{} {who}", self.0))))
    }
}

/// Renders every response as its status code.
struct StatusOnly;

impl Compiler for StatusOnly {
    fn compile(&self, response: &Response) -> Result<String, RenderError> {
        Ok(response.status.to_string())
    }
}

#[tokio::test]
async fn test_execute_and_render_per_entry() {
    let app = App::builder("acme")
        .workflow("greet", "main", || Greeting("hello"))
        .build()
        .unwrap();

    let response = app.execute(&EntryPoint::App, "greet/main/ada").await;
    let rendered: serde_json::Value = serde_json::from_str(&app.render(&response).unwrap()).unwrap();
    assert_eq!(rendered["payload"], json!("hello ada"));

    let response = app.execute(&EntryPoint::Cli, "greet/main/ada").await;
    assert_eq!(app.render(&response).unwrap(), "hello ada\n");

    let env = HttpEnvironment::new(Method::Get, "/greet/main/ada");
    let response = app.execute(&EntryPoint::Http(env), "").await;
    assert!(app.render(&response).unwrap().contains("<p>hello ada</p>"));
}

#[tokio::test]
async fn test_routing_failures_become_responses() {
    let app = App::builder("acme").build().unwrap();

    let response = app.execute(&EntryPoint::Cli, "").await;
    assert_eq!(response.status, 404);
    assert_eq!(response.content_type, Some(ContentType::CliText));

    let response = app.execute(&EntryPoint::App, "TRACE greet/main").await;
    assert_eq!(response.status, 405);
    assert_eq!(response.agent, "app");
}

#[tokio::test]
async fn test_uppercase_alias_is_routed_not_taken_as_a_method() {
    let mut config = Config::with_defaults();
    config.set("routes.uri.config", json!(["alias"]));
    config.set("routes.alias", json!({ "FAQ": ["help", "faq"] }));
    let mock = MockWorkflow::new();
    mock.expect_get().return_ok(Response::ok(json!("answers")));
    let app = App::builder("acme")
        .config(config)
        .workflow("help", "faq", {
            let mock = mock.clone();
            move || mock.clone()
        })
        .build()
        .unwrap();

    let response = app.call("FAQ").await;

    assert_eq!(response.status, 200);
    assert_eq!((response.module.as_str(), response.workflow.as_str()), ("help", "faq"));
    mock.verify();
}

#[tokio::test]
async fn test_missing_default_is_a_500() {
    let mut config = Config::new();
    config.set("routes.uri.config", json!(["module"]));
    let app = App::builder("acme").config(config).build().unwrap();

    let response = app.call("greet").await;

    assert_eq!(response.status, 500);
    assert!(response.message.starts_with("General server error:"));
    assert!(response.message.contains("routes.uri.default.workflow"));
}

#[tokio::test]
async fn test_apps_are_isolated() {
    let registry = AppRegistry::new();
    registry.register(
        App::builder("en")
            .workflow("greet", "main", || Greeting("hello"))
            .build()
            .unwrap(),
    );
    registry.register(
        App::builder("fr")
            .workflow("greet", "main", || Greeting("bonjour"))
            .build()
            .unwrap(),
    );

    let en = registry.get("en").unwrap();
    let fr = registry.get("fr").unwrap();
    assert_eq!(en.call("greet/main/ada").await.payload, json!("hello ada"));
    assert_eq!(fr.call("greet/main/ada").await.payload, json!("bonjour ada"));
    let en_instance = en.loader().registry().get("workflow/greet/main").unwrap();
    let fr_instance = fr.loader().registry().get("workflow/greet/main").unwrap();
    assert!(!en_instance.ptr_eq(&fr_instance));
    assert_eq!(registry.names(), ["en", "fr"]);
}

#[tokio::test]
async fn test_app_compiler_overrides_builtin() {
    let app = App::builder("acme")
        .workflow("greet", "main", || Greeting("hello"))
        .component("view-compiler/json", || Component::compiler(StatusOnly))
        .build()
        .unwrap();

    let response = app.execute(&EntryPoint::App, "greet/main").await;

    assert_eq!(app.render(&response).unwrap(), "200");
}

#[tokio::test]
async fn test_unknown_content_type_has_no_compiler() {
    let app = App::builder("acme")
        .workflow("greet", "main", || Greeting("hello"))
        .build()
        .unwrap();

    let response = app.call("greet/main/ada.xml").await;

    assert_eq!(response.content_type, Some(ContentType::Other("xml".into())));
    assert!(matches!(
        app.render(&response),
        Err(RenderError::NoCompiler(ct)) if ct == "xml"
    ));
}

#[test]
fn test_core_slot_only_exists_for_system_and_library() {
    let result = App::builder("acme")
        .core_component("workflow/greet/main", || Component::service(()))
        .build();
    assert!(matches!(result, Err(BuildError::NoSlot { slot: "core", .. })));

    let result = App::builder("acme")
        .component("workflow/greet", || Component::service(()))
        .build();
    assert!(matches!(
        result,
        Err(BuildError::Load(LoadError::MalformedNamespace { .. }))
    ));
}

#[test]
fn test_core_services_are_shared_by_default() {
    #[derive(Debug)]
    struct Mailer(&'static str);

    let app = App::builder("acme")
        .core_component("system/mailer", || Component::service(Mailer("smtp")))
        .build()
        .unwrap();

    let mailer = app
        .loader()
        .load("system/mailer", painless::LoadOptions::ALL)
        .unwrap()
        .unwrap();
    assert_eq!(mailer.downcast::<Mailer>().unwrap().0, "smtp");
}
