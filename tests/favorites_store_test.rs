mod common;

use std::sync::Arc;

use async_trait::async_trait;
use common::{restaurant, wait_for};
use restaurant_details::clients::{ActorClient, FavoritesClient};
use restaurant_details::model::{FavoritesSet, PlaceId};
use restaurant_details::persistence::{
    FavoritesRepository, InMemoryFavoritesRepository, PersistenceError,
};
use tokio::task::JoinHandle;

fn start(repository: Arc<dyn FavoritesRepository>) -> (FavoritesClient, JoinHandle<()>) {
    let (actor, client) = restaurant_details::favorites_actor::new(16);
    let handle = tokio::spawn(actor.run(repository));
    (client, handle)
}

/// Storage that is always down.
struct BrokenRepository;

#[async_trait]
impl FavoritesRepository for BrokenRepository {
    async fn load_favorites(&self) -> Result<FavoritesSet, PersistenceError> {
        Err(PersistenceError::Unavailable("disk unmounted".to_string()))
    }

    async fn save_favorites(&self, _favorites: &FavoritesSet) -> Result<(), PersistenceError> {
        Err(PersistenceError::Unavailable("disk unmounted".to_string()))
    }
}

#[tokio::test]
async fn test_toggle_is_its_own_inverse() {
    let (favorites, handle) = start(Arc::new(InMemoryFavoritesRepository::new()));
    let id = PlaceId::from("abc");

    assert!(!favorites.is_favorite(id.clone()).await.unwrap());
    assert!(favorites.toggle(restaurant("abc")).await.unwrap().is_favorite);
    assert!(favorites.is_favorite(id.clone()).await.unwrap());
    assert!(!favorites.toggle(restaurant("abc")).await.unwrap().is_favorite);
    assert!(!favorites.is_favorite(id).await.unwrap());

    drop(favorites);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_concurrent_toggles_are_serialized() {
    let (favorites, handle) = start(Arc::new(InMemoryFavoritesRepository::new()));

    let toggles: Vec<_> = (0..20)
        .map(|i| {
            let favorites = favorites.clone();
            let id = if i % 2 == 0 { "list" } else { "sheet" };
            tokio::spawn(async move { favorites.toggle(restaurant(id)).await.unwrap() })
        })
        .collect();

    let mut revisions = Vec::new();
    for toggle in toggles {
        revisions.push(toggle.await.unwrap().revision);
    }
    revisions.sort_unstable();
    assert_eq!(revisions, (1..=20).collect::<Vec<u64>>());

    // Ten toggles each: both back where they started.
    let snapshot = favorites.snapshot();
    assert!(snapshot.is_empty());
    assert_eq!(snapshot.revision(), 20);

    drop(favorites);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_observers_see_every_committed_toggle() {
    let (favorites, handle) = start(Arc::new(InMemoryFavoritesRepository::new()));
    let mut updates = favorites.observe();
    assert_eq!(updates.next().await, Some(FavoritesSet::default()));

    favorites.toggle(restaurant("abc")).await.unwrap();
    let snapshot = wait_for(&mut updates, |set| set.revision() == 1).await;
    assert!(snapshot.contains(&PlaceId::from("abc")));

    // Late subscriber starts from the present.
    favorites.toggle(restaurant("def")).await.unwrap();
    let mut late = favorites.observe();
    let first = late.next().await.unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(first.revision(), 2);

    drop(favorites);
    handle.await.unwrap();
    assert_eq!(updates.next().await.map(|set| set.revision()), Some(2));
    assert_eq!(updates.next().await, None);
}

#[tokio::test]
async fn test_loads_saved_favorites_and_saves_each_toggle() {
    let repository = Arc::new(InMemoryFavoritesRepository::with_favorites([restaurant("abc")]));
    let (favorites, handle) = start(repository.clone());

    assert!(favorites.is_favorite(PlaceId::from("abc")).await.unwrap());
    favorites.toggle(restaurant("def")).await.unwrap();

    let listed: Vec<String> = favorites
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id().to_string())
        .collect();
    assert_eq!(listed, ["abc", "def"]);
    assert_eq!(repository.saved().len(), 2);

    drop(favorites);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_storage_failure_is_a_warning() {
    let (favorites, handle) = start(Arc::new(BrokenRepository));

    // Load failed: the session starts empty.
    assert!(favorites.list().await.unwrap().is_empty());

    let outcome = favorites.toggle(restaurant("abc")).await.unwrap();
    assert!(outcome.is_favorite);
    assert!(outcome.warning.unwrap().contains("disk unmounted"));
    assert!(favorites.is_favorite(PlaceId::from("abc")).await.unwrap());

    drop(favorites);
    handle.await.unwrap();
}
