use tracing::{error, info, Instrument};

use student_registry::app_system::{setup_tracing, RegistryConfig, RegistrySystem};
use student_registry::transport::RouteResponse;

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = RegistryConfig::from_env();
    setup_tracing(&config.log_level);

    info!("Starting student registry");

    let system = RegistrySystem::new(&config);

    let span = tracing::info_span!("student_registration");
    let response = async {
        info!("Registering test student");
        system.routes.post(r#"{"name": "Student", "age": 16}"#).await
    }
    .instrument(span)
    .await;

    let student = match response {
        RouteResponse::Created { location, student } => {
            info!(%location, name = student.name(), age = student.age(), "Student created");
            student
        }
        other => {
            error!(status = other.status(), "Registration failed");
            return Err(format!("registration failed: {:?}", other));
        }
    };

    let id = student.id().to_string();

    let span = tracing::info_span!("student_lifecycle", student_id = %id);
    async {
        let found = system.routes.get(&id).await;
        info!(status = found.status(), "Looked up student");

        let deleted = system.routes.delete(&id).await;
        info!(status = deleted.status(), "Unregistered student");

        let gone = system.routes.get(&id).await;
        info!(status = gone.status(), "Looked up student again");
    }
    .instrument(span)
    .await;

    system.shutdown().await.map_err(|e| e.to_string())?;

    info!("Student registry completed successfully");
    Ok(())
}
