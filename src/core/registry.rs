//! # Service Registry - 싱글톤 의존성 주입 시스템
//!
//! `#[service]` / `#[repository]` 매크로가 생성한 등록 정보를 `inventory`로 수집하고,
//! 타입 기반으로 싱글톤 인스턴스를 찾아 주입하는 컨테이너입니다.
//!
//! ## 동작 방식
//!
//! ```text
//! 1. 컴파일 타임
//!    ├─ #[service]    → ServiceRegistration 생성
//!    ├─ #[repository] → RepositoryRegistration 생성
//!    └─ inventory::collect! → 전역 레지스트리에 수집
//!
//! 2. 애플리케이션 시작 (main.rs)
//!    ├─ Database, RedisClient, BunnyClient 직접 생성
//!    └─ ServiceLocator::set() 으로 등록
//!
//! 3. ServiceLocator::initialize_all()
//!    ├─ 모든 리포지토리 생성 (인프라에만 의존)
//!    └─ 모든 서비스 생성 (Arc<T> 필드 → ServiceLocator::get::<T>())
//! ```
//!
//! ## 이름 규칙
//!
//! 타입 이름에서 접미사를 떼고 소문자로 만든 값이 등록 이름과 일치해야 합니다.
//!
//! | 타입 | 조회 키 | 매크로 인자 |
//! |------|---------|-------------|
//! | `CourseRepository` | `course` | `#[repository(name = "course", ...)]` |
//! | `WishlistService` | `wishlist` | `#[service(name = "wishlist")]` |
//! | `QuizAttemptRepository` | `quizattempt` | `#[repository(name = "quiz_attempt", ...)]` |
//!
//! 등록 이름의 밑줄은 비교 전에 제거됩니다.

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use crate::utils::display_terminal::{print_boxed_title, print_cache_initialized, print_final_summary, print_step_complete, print_step_start, print_sub_task};

/// 비즈니스 로직 서비스를 위한 공통 인터페이스
///
/// 모든 `#[service]` 매크로가 적용된 구조체가 이 trait을 자동 구현합니다.
#[async_trait]
pub trait Service: Send + Sync {
    /// 서비스의 고유 이름
    fn name(&self) -> &str;

    /// 서비스 초기화 로직
    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// 데이터 액세스 리포지토리를 위한 공통 인터페이스
///
/// 모든 `#[repository]` 매크로가 적용된 구조체가 이 trait을 자동 구현합니다.
#[async_trait]
pub trait Repository: Send + Sync {
    /// 리포지토리의 고유 이름
    fn name(&self) -> &str;

    /// 연결된 MongoDB 컬렉션 이름
    fn collection_name(&self) -> &str;

    /// 인덱스 생성 등 초기화 로직
    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// `#[service]` 매크로가 생성하는 등록 메타데이터
pub struct ServiceRegistration {
    /// 서비스의 고유 이름 (예: `course_service`)
    pub name: &'static str,
    /// 인스턴스 생성 함수. `Box<Arc<T>>`를 반환합니다.
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

/// `#[repository]` 매크로가 생성하는 등록 메타데이터
pub struct RepositoryRegistration {
    /// 리포지토리의 고유 이름 (예: `course_repository`)
    pub name: &'static str,
    /// 인스턴스 생성 함수. `Box<Arc<T>>`를 반환합니다.
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

inventory::collect!(ServiceRegistration);
inventory::collect!(RepositoryRegistration);

/// 서비스 이름 → 등록정보 매핑 (첫 접근 시 한 번 구성)
static SERVICE_NAME_CACHE: Lazy<HashMap<String, &'static ServiceRegistration>> = Lazy::new(|| {
    let cache: HashMap<_, _> = inventory::iter::<ServiceRegistration>()
        .map(|registration| (normalize_registration_name(registration.name), registration))
        .collect();

    print_cache_initialized("Service", cache.len());
    cache
});

/// 리포지토리 이름 → 등록정보 매핑 (첫 접근 시 한 번 구성)
static REPOSITORY_NAME_CACHE: Lazy<HashMap<String, &'static RepositoryRegistration>> = Lazy::new(|| {
    let cache: HashMap<_, _> = inventory::iter::<RepositoryRegistration>()
        .map(|registration| (normalize_registration_name(registration.name), registration))
        .collect();

    print_cache_initialized("Repository", cache.len());
    cache
});

/// `course_service` / `course_repository` → `course`, `quiz_attempt` → `quizattempt`
///
/// 타입 이름(`QuizAttemptRepository`)을 소문자로 바꾼 키와 비교하므로 `_`를 제거합니다.
fn normalize_registration_name(name: &str) -> String {
    name.strip_suffix("_service")
        .or_else(|| name.strip_suffix("_repository"))
        .unwrap_or(name)
        .replace('_', "")
}

/// `learnhub_backend::services::courses::course_service::CourseService` → `CourseService`
fn short_type_name(type_name: &str) -> &str {
    match type_name.rfind("::") {
        Some(pos) => &type_name[pos + 2..],
        None => type_name,
    }
}

/// 타입 이름으로부터 레지스트리 조회 키와 생성자를 찾습니다.
///
/// `CourseRepository` → 리포지토리 캐시의 `course`,
/// `CourseService` → 서비스 캐시의 `course`.
fn find_constructor(clean_type_name: &str) -> Option<(&'static str, fn() -> Box<dyn Any + Send + Sync>)> {
    if let Some(entity) = clean_type_name.strip_suffix("Repository") {
        return REPOSITORY_NAME_CACHE
            .get(&entity.to_lowercase())
            .map(|registration| (registration.name, registration.constructor));
    }

    if let Some(entity) = clean_type_name.strip_suffix("Service") {
        return SERVICE_NAME_CACHE
            .get(&entity.to_lowercase())
            .map(|registration| (registration.name, registration.constructor));
    }

    None
}

/// 싱글톤 의존성 주입 컨테이너
///
/// - **싱글톤 보장**: 각 타입당 하나의 인스턴스
/// - **지연 초기화**: 첫 요청 시점에 인스턴스 생성
/// - **순환 참조 감지**: 초기화 중인 타입을 추적
///
/// 생성자 호출 중에는 락을 잡지 않습니다. 생성자가 다시 `get()`을 호출해
/// 하위 의존성을 해결하기 때문입니다.
pub struct ServiceLocator {
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
    initializing: RwLock<HashSet<TypeId>>,
}

impl ServiceLocator {
    fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
            initializing: RwLock::new(HashSet::new()),
        }
    }

    fn cached<T: 'static + Send + Sync>(type_id: TypeId) -> Option<Arc<T>> {
        let instances = LOCATOR.instances.read().unwrap_or_else(|e| e.into_inner());
        instances
            .get(&type_id)
            .map(|instance| {
                instance.clone()
                    .downcast::<T>()
                    .expect("Type mismatch in ServiceLocator")
            })
    }

    /// 지정된 타입의 싱글톤 인스턴스를 가져옵니다.
    ///
    /// ## 처리 과정
    ///
    /// 1. 캐시 확인
    /// 2. 순환 참조 검사
    /// 3. 타입 이름 → 레지스트리 조회 (`CourseService` → `course`)
    /// 4. 등록된 생성자 호출 (락 없이)
    /// 5. 캐시에 저장 (먼저 저장된 인스턴스가 있으면 그것을 사용)
    ///
    /// # Panics
    ///
    /// - 순환 참조 (A → B → A)
    /// - 레지스트리에 없는 타입
    /// - 등록된 타입과 요청 타입 불일치
    pub fn get<T: 'static + Send + Sync>() -> Arc<T> {
        let type_id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();

        if let Some(instance) = Self::cached::<T>(type_id) {
            return instance;
        }

        {
            let mut initializing = LOCATOR.initializing.write().unwrap_or_else(|e| e.into_inner());
            if !initializing.insert(type_id) {
                eprintln!("❌ Circular dependency detected for type: {}", type_name);
                panic!("Circular dependency detected: {} is already being initialized", type_name);
            }
        }

        let clean_type_name = short_type_name(type_name);
        let result = std::panic::catch_unwind(|| {
            let (registered_name, constructor) = find_constructor(clean_type_name)
                .unwrap_or_else(|| panic!(
                    "Service not found: {}. Make sure it's registered with #[service] or #[repository] macro, or manually registered with ServiceLocator::set()",
                    type_name
                ));

            match constructor().downcast::<Arc<T>>() {
                Ok(instance) => *instance,
                Err(_) => panic!("Type mismatch for registration: {}", registered_name),
            }
        });

        {
            let mut initializing = LOCATOR.initializing.write().unwrap_or_else(|e| e.into_inner());
            initializing.remove(&type_id);
        }

        match result {
            Ok(instance) => {
                let mut instances = LOCATOR.instances.write().unwrap_or_else(|e| e.into_inner());
                instances
                    .entry(type_id)
                    .or_insert_with(|| instance as Arc<dyn Any + Send + Sync>)
                    .clone()
                    .downcast::<T>()
                    .expect("Type mismatch in ServiceLocator")
            }
            Err(e) => {
                eprintln!("ERROR: Failed to create instance for {}: {:?}", type_name, e);
                panic!("Failed to create instance for {}", type_name);
            }
        }
    }

    /// 외부에서 생성된 인프라 인스턴스를 직접 등록합니다.
    ///
    /// ```rust,ignore
    /// ServiceLocator::set(Arc::new(Database::new().await?));
    /// ServiceLocator::set(Arc::new(RedisClient::new().await?));
    /// ServiceLocator::set(Arc::new(BunnyClient::from_env()));
    /// ServiceLocator::initialize_all().await?;
    /// ```
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let type_id = TypeId::of::<T>();
        let clean_name = short_type_name(std::any::type_name::<T>());

        println!("📦 Registering: {}", clean_name);

        let mut instances = LOCATOR.instances.write().unwrap_or_else(|e| e.into_inner());
        instances.insert(type_id, instance as Arc<dyn Any + Send + Sync>);
    }

    /// 등록 여부만 확인합니다. 인스턴스를 생성하지 않습니다.
    pub fn contains<T: 'static + Send + Sync>() -> bool {
        let instances = LOCATOR.instances.read().unwrap_or_else(|e| e.into_inner());
        instances.contains_key(&TypeId::of::<T>())
    }

    /// 모든 리포지토리와 서비스를 미리 생성합니다.
    ///
    /// 리포지토리를 먼저, 서비스를 나중에 생성합니다.
    pub async fn initialize_all() -> Result<(), Box<dyn std::error::Error>> {
        print_boxed_title("🔄 INITIALIZING SERVICE REGISTRY");

        let repo_registrations: Vec<_> = inventory::iter::<RepositoryRegistration>().collect();
        let repo_count = repo_registrations.len();

        if repo_count > 0 {
            print_step_start(1, "Creating Repository instances");

            for registration in repo_registrations {
                let _instance = (registration.constructor)();
                print_sub_task(registration.name, "✓ Created");
            }

            print_step_complete(1, "Repository instances created", repo_count);
        }

        let service_registrations: Vec<_> = inventory::iter::<ServiceRegistration>().collect();
        let service_count = service_registrations.len();

        if service_count > 0 {
            print_step_start(2, "Creating Service instances");

            for registration in service_registrations {
                let _instance = (registration.constructor)();
                print_sub_task(registration.name, "✓ Created");
            }

            print_step_complete(2, "Service instances created", service_count);
        }

        print_final_summary(repo_count, service_count);

        Ok(())
    }
}

static LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);

#[cfg(test)]
mod tests {
    use super::*;

    struct ManualComponent {
        value: u32,
    }

    #[test]
    fn test_normalize_registration_name() {
        assert_eq!(normalize_registration_name("course_service"), "course");
        assert_eq!(normalize_registration_name("wishlist_repository"), "wishlist");
        assert_eq!(normalize_registration_name("media"), "media");
        assert_eq!(normalize_registration_name("quiz_attempt"), "quizattempt");
        assert_eq!(normalize_registration_name("search_history_repository"), "searchhistory");
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(
            short_type_name("learnhub_backend::services::courses::course_service::CourseService"),
            "CourseService"
        );
        assert_eq!(short_type_name("Database"), "Database");
    }

    #[test]
    fn test_set_then_get_returns_same_instance() {
        ServiceLocator::set(Arc::new(ManualComponent { value: 7 }));

        assert!(ServiceLocator::contains::<ManualComponent>());
        let first = ServiceLocator::get::<ManualComponent>();
        let second = ServiceLocator::get::<ManualComponent>();

        assert_eq!(first.value, 7);
        assert!(Arc::ptr_eq(&first, &second));
    }
}
