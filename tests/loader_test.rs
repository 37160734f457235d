use painless::loader::{
    Component, ComponentFactory, ComponentSource, LoadError, LoadOptions, Loader, SourceError,
    StaticSource,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug)]
struct Settings(&'static str);

/// Source that fails for every location it is asked about and counts the attempts.
#[derive(Default)]
struct BrokenSource {
    fetches: AtomicUsize,
}

impl ComponentSource for BrokenSource {
    fn fetch(&self, location: &str) -> Result<Option<ComponentFactory>, SourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Err(SourceError::new(location, "permission denied"))
    }
}

fn settings_loader() -> Loader {
    let mut source = StaticSource::new();
    source.register("core/system/config", || Component::service(Settings("core")));
    source.register("acme/system/config", || Component::service(Settings("acme")));
    Loader::new("acme").with_source(Arc::new(source))
}

#[test]
fn test_repeated_load_returns_cached_instance() {
    let loader = settings_loader();

    let first = loader.load("system/config", LoadOptions::ALL).unwrap().unwrap();
    let second = loader.load("system/config", LoadOptions::ALL).unwrap().unwrap();

    assert!(first.ptr_eq(&second));
    assert_eq!(loader.registry().len(), 1);
}

#[test]
fn test_extension_wins_and_owns_the_registry_entry() {
    let loader = settings_loader();

    let component = loader.load("system/config", LoadOptions::ALL).unwrap().unwrap();
    assert_eq!(component.downcast::<Settings>().unwrap().0, "acme");

    let cached = loader.registry().get("system/config").unwrap();
    assert!(cached.ptr_eq(&component));
    assert!(loader.is_defined("PainlessConfig"));
    assert!(loader.is_defined("AcmeConfig"));
}

#[test]
fn test_core_only_skips_the_extension() {
    let loader = settings_loader();
    let component = loader
        .load("system/config", LoadOptions::CORE_ONLY)
        .unwrap()
        .unwrap();
    assert_eq!(component.downcast::<Settings>().unwrap().0, "core");
    assert!(!loader.is_defined("AcmeConfig"));
}

#[test]
fn test_wrong_arity_is_rejected_before_any_lookup() {
    let broken = Arc::new(BrokenSource::default());
    let loader = Loader::new("acme").with_source(broken.clone());

    for namespace in ["workflow/blog", "dao/shop/orders", "model/shop", "system"] {
        let err = loader.load(namespace, LoadOptions::ALL).unwrap_err();
        assert!(
            matches!(err, LoadError::MalformedNamespace { .. }),
            "{namespace}: {err:?}"
        );
        assert!(err.is_programmer_error());
    }
    assert_eq!(broken.fetches.load(Ordering::SeqCst), 0);
}

#[test]
fn test_adapter_bases_cannot_be_loaded_directly() {
    let loader = Loader::new("acme");
    for namespace in ["data/adapter/mysql", "data/dao", "data"] {
        assert!(matches!(
            loader.load(namespace, LoadOptions::ALL),
            Err(LoadError::DirectAdapterInstantiationForbidden(_))
        ));
    }
}

#[test]
fn test_unknown_kind_is_rejected() {
    let loader = Loader::new("acme");
    assert!(matches!(
        loader.load("widget/blog/post", LoadOptions::ALL),
        Err(LoadError::UnknownComponentKind { .. })
    ));
}

#[test]
fn test_dao_defines_its_adapter_bases_first() {
    #[derive(Debug)]
    struct OrdersDao;

    let mut source = StaticSource::new();
    source.register("core/data/dao", || Component::service(()));
    source.register("core/data/adapter/mysql", || Component::service(()));
    source.register("acme/dao/shop/orders/mysql", || Component::service(OrdersDao));
    let loader = Loader::new("acme").with_source(Arc::new(source));

    let component = loader
        .load("dao/shop/orders/mysql", LoadOptions::ALL)
        .unwrap()
        .unwrap();

    assert!(component.downcast::<OrdersDao>().is_some());
    assert!(loader.is_defined("PainlessDao"));
    assert!(loader.is_defined("PainlessMysqlAdapter"));
    assert!(loader.is_defined("ShopOrdersMysqlDao"));
    assert_eq!(loader.registry().namespaces(), ["dao/shop/orders/mysql"]);
}

#[test]
fn test_missing_component_is_not_an_error() {
    let loader = settings_loader();
    assert!(loader
        .load("workflow/blog/post", LoadOptions::ALL)
        .unwrap()
        .is_none());
}

#[test]
fn test_misses_leave_no_pending_locks() {
    let loader = settings_loader();

    for i in 0..1000 {
        let missing = loader
            .load(&format!("workflow/m{i}/w"), LoadOptions::ALL)
            .unwrap();
        assert!(missing.is_none());
    }
    assert!(loader.load("system/config", LoadOptions::ALL).unwrap().is_some());

    assert_eq!(loader.registry().pending_loads(), 0);
    assert_eq!(loader.registry().len(), 1);
}

#[test]
fn test_unreadable_source_propagates() {
    let loader = Loader::new("acme").with_source(Arc::new(BrokenSource::default()));
    let err = loader
        .load("workflow/blog/post", LoadOptions::ALL)
        .unwrap_err();
    assert!(matches!(err, LoadError::Source(_)));
    assert!(err.is_retryable());
}

#[test]
fn test_sources_are_searched_in_order() {
    let mut first = StaticSource::new();
    first.register("acme/system/mailer", || Component::service(Settings("first")));
    let mut second = StaticSource::new();
    second.register("acme/system/mailer", || Component::service(Settings("second")));
    let loader = Loader::new("acme")
        .with_source(Arc::new(first))
        .with_source(Arc::new(second));

    let component = loader.load("system/mailer", LoadOptions::ALL).unwrap().unwrap();
    assert_eq!(component.downcast::<Settings>().unwrap().0, "first");
}

#[tokio::test]
async fn test_concurrent_loads_instantiate_once() {
    let built = Arc::new(AtomicUsize::new(0));
    let mut source = StaticSource::new();
    let counter = built.clone();
    source.register("acme/library/markdown", move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Component::service(Settings("markdown"))
    });
    let loader = Arc::new(Loader::new("acme").with_source(Arc::new(source)));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let loader = loader.clone();
            tokio::task::spawn_blocking(move || {
                loader
                    .load("library/markdown", LoadOptions::ALL)
                    .unwrap()
                    .unwrap()
            })
        })
        .collect();

    let mut instances = Vec::new();
    for handle in handles {
        instances.push(handle.await.unwrap());
    }

    assert_eq!(built.load(Ordering::SeqCst), 1);
    assert!(instances.windows(2).all(|w| w[0].ptr_eq(&w[1])));
    assert_eq!(loader.registry().pending_loads(), 0);
}

#[test]
fn test_resolve_checks_workflow_arity() {
    let loader = Loader::new("acme");
    assert!(matches!(
        loader.resolve("workflow/onlyone"),
        Err(LoadError::MalformedNamespace { .. })
    ));

    let descriptor = loader.resolve("workflow/blog/post").unwrap();
    assert!(descriptor.core.is_none());
    let extension = descriptor.extension.unwrap();
    assert_eq!(extension.type_id, "BlogPostWorkflow");
    assert_eq!(extension.location, "acme/workflow/blog/post");
}
