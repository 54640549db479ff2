// src/application/tag_service.rs
use crate::application::repository::keyword_filter;
use crate::application::{ListQuery, TagRepository};
use crate::constants::{DEFAULT_PAGE_SIZE, TAG_NAME_EMPTY_MSG};
use crate::domain::{DomainError, PageRequest, Tag, TagList};
use tracing::{debug, info};

pub struct TagService<R: TagRepository> {
    repository: R,
    default_page_size: i64,
}

impl<R: TagRepository> TagService<R> {
    pub fn new(repository: R) -> Self {
        Self::with_default_page_size(repository, DEFAULT_PAGE_SIZE)
    }

    pub fn with_default_page_size(repository: R, default_page_size: i64) -> Self {
        Self {
            repository,
            default_page_size,
        }
    }

    /// One page of tags whose name contains `keyword` (empty: all tags).
    ///
    /// The keyword is applied once, by the store, before the window is cut,
    /// so `total` counts every match and pages are always full except the last.
    pub fn list(&self, page: i64, page_size: i64, keyword: &str) -> Result<TagList, DomainError> {
        let request = PageRequest::normalize(page, page_size, self.default_page_size);
        let keyword = keyword_filter(keyword);

        let total = self.repository.count(keyword)?;
        let data = if request.offset() >= total {
            Vec::new()
        } else {
            self.repository.list(&ListQuery::window(keyword, request))?
        };

        debug!(
            page = request.page,
            page_size = request.page_size,
            total,
            returned = data.len(),
            "Listed tags"
        );
        Ok(TagList::new(total, request, data))
    }

    pub fn get(&self, id: i64) -> Result<Tag, DomainError> {
        self.repository
            .list(&ListQuery::by_id(id))?
            .into_iter()
            .next()
            .ok_or(DomainError::tag_not_found(id))
    }

    pub fn create(&self, name: &str) -> Result<Tag, DomainError> {
        if name.is_empty() {
            return Err(DomainError::Validation(TAG_NAME_EMPTY_MSG.to_string()));
        }

        let mut tag = Tag::unsaved(name);
        self.repository.create(&mut tag)?;
        info!(tag_id = tag.id, "Tag created");
        Ok(tag)
    }

    /// Rename a tag. The whole row is overwritten with `{id, name}`.
    pub fn update(&self, id: i64, name: &str) -> Result<Tag, DomainError> {
        if name.is_empty() {
            return Err(DomainError::Validation(TAG_NAME_EMPTY_MSG.to_string()));
        }

        let tag = Tag {
            id,
            name: name.to_string(),
        };
        if self.repository.update(&tag)? == 0 {
            debug!(tag_id = id, "No tag to update");
            return Err(DomainError::tag_not_found(id));
        }
        info!(tag_id = id, "Tag updated");
        Ok(tag)
    }

    pub fn delete(&self, id: i64) -> Result<(), DomainError> {
        if self.repository.delete(id)? == 0 {
            debug!(tag_id = id, "No tag to delete");
            return Err(DomainError::tag_not_found(id));
        }
        info!(tag_id = id, "Tag deleted");
        Ok(())
    }
}
