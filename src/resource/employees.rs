//! Employee creation by role
//!
//! `/api/employee` lists, searches, updates and deletes every employee, but
//! new employees are created through the endpoint of their role.

use super::client::ResourceClient;
use super::registry::{get_resource, Operation};
use crate::error::{Error, Result};
use crate::model::{Employee, EmployeeRole};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct NewEmployee<'a> {
    name: &'a str,
}

/// What the role endpoints answer with
#[derive(Debug, Deserialize)]
struct CreatedEmployee {
    #[serde(default)]
    id: String,
    name: String,
}

impl ResourceClient<Employee> {
    /// Create an employee through the endpoint for `role`
    pub async fn create_with_role(&self, name: &str, role: EmployeeRole) -> Result<Employee> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::validation("name", "Name is required"));
        }

        let key = role.resource_key();
        let def = get_resource(key).ok_or_else(|| Error::UnknownResource(key.to_string()))?;
        if !def.supports(Operation::Create) {
            return Err(Error::Unsupported {
                resource: key.to_string(),
                operation: Operation::Create.as_str(),
            });
        }

        tracing::info!("Creating {} {}", role, name);
        let created: CreatedEmployee = self
            .api()
            .post(&def.collection_path(), &NewEmployee { name })
            .await?;

        Ok(Employee {
            id: created.id,
            name: created.name,
            role,
        })
    }
}
