//! Resource registry: which endpoints a management screen talks to and how
//! their list responses are shaped.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::mutation::MutationIntent;
use crate::domain::types::{ResourceName, RowId, TypeConstraintError};

/// A record of a remote collection. The controller only ever looks at its id.
pub trait Row: DeserializeOwned + Clone + Send + Sync + 'static {
    fn row_id(&self) -> &RowId;
}

/// Schemaless row, used where no typed row exists (the CLI, exports).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct JsonRow {
    #[serde(skip)]
    id: RowId,
    fields: Map<String, Value>,
}

impl JsonRow {
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

impl<'de> Deserialize<'de> for JsonRow {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let fields = Map::<String, Value>::deserialize(deserializer)?;
        let raw_id = fields
            .get("id")
            .or_else(|| fields.get("_id"))
            .cloned()
            .ok_or_else(|| serde::de::Error::missing_field("id"))?;
        let id = RowId::deserialize(raw_id).map_err(serde::de::Error::custom)?;
        Ok(Self { id, fields })
    }
}

impl Row for JsonRow {
    fn row_id(&self) -> &RowId {
        &self.id
    }
}

/// How a list endpoint shapes its `payload`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvelopeMode {
    /// `payload = { data: [...], total: n }`, paginated server-side.
    Paged,
    /// `payload = [...]`, the whole filtered collection in one response.
    Bare,
}

/// HTTP verb of a mutation route.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Post,
    Put,
    Patch,
    Delete,
}

/// A mutation route; `{id}` in `path` is replaced with the target row id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub method: Method,
    pub path: String,
}

impl Route {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }

    pub fn resolve(&self, id: Option<&RowId>) -> String {
        match id {
            Some(id) => self.path.replace("{id}", id.as_str()),
            None => self.path.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceEndpoints {
    pub list: String,
    pub create: Route,
    pub update: Route,
    pub delete: Route,
    pub toggle_status: Route,
}

impl ResourceEndpoints {
    /// Conventional `<resource>/<action>` layout.
    pub fn conventional(resource: &str) -> Self {
        Self {
            list: resource.to_string(),
            create: Route::new(Method::Post, format!("{resource}/create")),
            update: Route::new(Method::Put, format!("{resource}/update/{{id}}")),
            delete: Route::new(Method::Delete, format!("{resource}/delete/{{id}}")),
            toggle_status: Route::new(Method::Put, format!("{resource}/toggle-status/{{id}}")),
        }
    }

    pub fn route_for(&self, intent: &MutationIntent) -> &Route {
        match intent {
            MutationIntent::Create(_) => &self.create,
            MutationIntent::Update(..) => &self.update,
            MutationIntent::Delete(_) => &self.delete,
            MutationIntent::ToggleStatus(_) => &self.toggle_status,
        }
    }
}

/// Everything the controller needs to know about one remote collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceSpec {
    pub name: ResourceName,
    pub endpoints: ResourceEndpoints,
    pub envelope: EnvelopeMode,
}

impl ResourceSpec {
    pub fn new(name: ResourceName, envelope: EnvelopeMode) -> Self {
        let endpoints = ResourceEndpoints::conventional(name.as_str());
        Self {
            name,
            endpoints,
            envelope,
        }
    }

    pub fn endpoints(mut self, endpoints: ResourceEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }
}

/// The management screens of the admin dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Clinics,
    Doctors,
    Faqs,
    Blogs,
    Specialties,
    Partners,
    Transactions,
    Reviews,
    Appointments,
    Patients,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 10] = [
        ResourceKind::Clinics,
        ResourceKind::Doctors,
        ResourceKind::Faqs,
        ResourceKind::Blogs,
        ResourceKind::Specialties,
        ResourceKind::Partners,
        ResourceKind::Transactions,
        ResourceKind::Reviews,
        ResourceKind::Appointments,
        ResourceKind::Patients,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Clinics => "clinics",
            ResourceKind::Doctors => "doctors",
            ResourceKind::Faqs => "faqs",
            ResourceKind::Blogs => "blogs",
            ResourceKind::Specialties => "specialties",
            ResourceKind::Partners => "partners",
            ResourceKind::Transactions => "transactions",
            ResourceKind::Reviews => "reviews",
            ResourceKind::Appointments => "appointments",
            ResourceKind::Patients => "patients",
        }
    }

    /// Small lookup collections come back as bare arrays.
    pub fn envelope(self) -> EnvelopeMode {
        match self {
            ResourceKind::Faqs | ResourceKind::Specialties | ResourceKind::Partners => {
                EnvelopeMode::Bare
            }
            _ => EnvelopeMode::Paged,
        }
    }

    pub fn spec(self) -> ResourceSpec {
        ResourceSpec::new(ResourceName::from_static(self.as_str()), self.envelope())
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or(TypeConstraintError::InvalidValue(s.to_string()))
    }
}
