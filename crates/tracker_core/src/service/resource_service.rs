//! Resource allocation use-case service.

use crate::model::resource::{NewResource, ResourceId, ResourceRecord};
use crate::repo::resource_repo::ResourceRepository;
use crate::repo::RepoResult;
use log::info;

pub struct ResourceService<R: ResourceRepository> {
    repo: R,
}

impl<R: ResourceRepository> ResourceService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn add_resource(&self, resource: &NewResource) -> RepoResult<ResourceId> {
        let id = self.repo.create_resource(resource)?;
        info!(
            "event=resource_create module=service status=ok resource_id={id} project_id={} role={} phase={} allocation_pct={}",
            resource.project_id,
            resource.role,
            resource.phase,
            resource.allocation_pct.get()
        );
        Ok(id)
    }

    pub fn list_all(&self) -> RepoResult<Vec<ResourceRecord>> {
        self.repo.list_all()
    }

    pub fn delete_resource(&self, id: ResourceId) -> RepoResult<()> {
        self.repo.delete_resource(id)?;
        info!("event=resource_delete module=service status=ok resource_id={id}");
        Ok(())
    }
}
